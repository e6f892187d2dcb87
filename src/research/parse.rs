//! Decoding of free-form research answers

use crate::extract::{parse_json, Confidence, LicenseFinding};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a typed record from an answer, optionally from one key of it
///
/// When `key` is given and the answer is an object containing it, only that
/// member is decoded; otherwise the whole answer is.
pub(crate) fn decode_section<T: DeserializeOwned>(content: &str, key: Option<&str>) -> Option<T> {
    let value: Value = parse_json(content).ok()?;
    let section = match key.and_then(|key| value.get(key)) {
        Some(section) => section.clone(),
        None => value,
    };
    serde_json::from_value(section).ok()
}

/// Reads license fields from prose, one `label: value` line at a time
///
/// The content is lower-cased first, so the values come back lower-cased.
pub fn scan_license_lines(content: &str) -> LicenseFinding {
    let mut finding = LicenseFinding::default();
    let lowered = content.to_lowercase();

    for line in lowered.lines() {
        let Some((_, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();

        if line.contains("license type") || line.contains("license:") {
            finding.license_type = Some(value);
        } else if line.contains("license url") || line.contains("license link") {
            finding.license_url = Some(value);
        } else if line.contains("confidence") {
            finding.confidence = Confidence::parse(&value);
        }
    }

    finding.has_license = finding.has_license_type();
    finding
}

/// JSON first, then the line scanner
pub(crate) fn parse_license(content: &str, key: Option<&str>) -> LicenseFinding {
    decode_section(content, key).unwrap_or_else(|| scan_license_lines(content))
}
