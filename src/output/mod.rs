//! Report documents
//!
//! A report wraps one extraction result with the URL, the mode that
//! produced it, a timestamp and the hash of the configuration used.

use crate::HarvestError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum length of the URL part of a default report file name
const MAX_URL_STEM_CHARS: usize = 50;

/// One saved or printed extraction report
#[derive(Debug, Clone, Serialize)]
pub struct Report<T: Serialize> {
    pub url: String,
    pub mode: String,
    pub timestamp: DateTime<Utc>,
    pub config_hash: String,
    pub result: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(url: impl Into<String>, mode: impl Into<String>, config_hash: impl Into<String>, result: T) -> Self {
        Self {
            url: url.into(),
            mode: mode.into(),
            timestamp: Utc::now(),
            config_hash: config_hash.into(),
            result,
        }
    }

    /// Pretty-printed JSON form of the report
    pub fn to_json(&self) -> Result<String, HarvestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Turns a URL into a file-name-safe stem
///
/// The scheme is dropped, `/` becomes `_` and the result is cut to 50
/// characters.
///
/// # Example
///
/// ```
/// use metaharvest::output::url_file_stem;
///
/// assert_eq!(url_file_stem("https://data.gov.uk/dataset/x"), "data.gov.uk_dataset_x");
/// ```
pub fn url_file_stem(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme
        .replace('/', "_")
        .chars()
        .take(MAX_URL_STEM_CHARS)
        .collect()
}

/// Default location of the report for `url` created at `timestamp`
pub fn default_report_path(directory: &Path, url: &str, timestamp: DateTime<Utc>) -> PathBuf {
    directory.join(format!(
        "metadata_extraction_{}_{}.json",
        url_file_stem(url),
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

/// Writes a report as pretty-printed JSON, creating parent directories
pub fn write_report<T: Serialize>(report: &Report<T>, path: &Path) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, report.to_json()?)?;
    tracing::info!("Report saved to {}", path.display());
    Ok(())
}
