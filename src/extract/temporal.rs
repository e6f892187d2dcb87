//! Temporal coverage extraction

use crate::analyzer::ContentAnalyzer;
use crate::crawler::Crawler;
use crate::extract::prompts::TEMPORAL_PROMPT;
use crate::extract::response::{is_present, lenient_object, lenient_string, parse_json};
use crate::extract::{combined_site_text, Extractor};
use crate::HarvestError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Period of time the data covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFrequency {
    #[serde(default, deserialize_with = "lenient_string")]
    pub frequency: Option<String>,
}

/// Temporal metadata of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalMetadata {
    #[serde(default, deserialize_with = "lenient_object")]
    pub coverage_period: CoveragePeriod,
    #[serde(default, deserialize_with = "lenient_object")]
    pub update_frequency: UpdateFrequency,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub temporal_resolution: Option<String>,
}

impl TemporalMetadata {
    /// True when no field carries any information
    pub fn is_empty(&self) -> bool {
        !is_present(&self.coverage_period.start_date)
            && !is_present(&self.coverage_period.end_date)
            && !is_present(&self.update_frequency.frequency)
            && !is_present(&self.last_updated)
            && !is_present(&self.temporal_resolution)
    }
}

/// Extracts temporal coverage from a few pages of a site
pub struct TemporalExtractor {
    crawler: Crawler,
    analyzer: Arc<dyn ContentAnalyzer>,
    max_pages: usize,
}

impl TemporalExtractor {
    pub fn new(crawler: Crawler, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self {
            crawler,
            analyzer,
            max_pages: 3,
        }
    }

    /// Sets how many pages are crawled
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Crawls the site and asks the analyzer for its temporal coverage
    ///
    /// An empty crawl or an unparsable answer yields an empty record.
    pub async fn extract(&self, url: &str) -> Result<TemporalMetadata, HarvestError> {
        let Some(content) = combined_site_text(&self.crawler, url, self.max_pages).await else {
            tracing::info!("No pages fetched from {}, skipping temporal analysis", url);
            return Ok(TemporalMetadata::default());
        };

        let response = self.analyzer.analyze(&content, TEMPORAL_PROMPT).await?;

        Ok(parse_json(&response).unwrap_or_else(|e| {
            tracing::warn!("Unparsable temporal analysis for {}: {}", url, e);
            TemporalMetadata::default()
        }))
    }
}

#[async_trait]
impl Extractor for TemporalExtractor {
    type Output = TemporalMetadata;

    async fn extract(&self, url: &str) -> Result<TemporalMetadata, HarvestError> {
        TemporalExtractor::extract(self, url).await
    }
}
