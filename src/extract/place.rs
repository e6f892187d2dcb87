//! Geographic coverage extraction

use crate::analyzer::ContentAnalyzer;
use crate::crawler::Crawler;
use crate::extract::prompts::PLACE_PROMPT;
use crate::extract::response::{lenient_list, lenient_object, lenient_string, parse_json};
use crate::extract::{combined_site_text, Extractor};
use crate::HarvestError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Countries and regions a dataset covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicCoverage {
    #[serde(default, deserialize_with = "lenient_list")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub regions: Vec<String>,
}

/// Identifier systems used for places
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceIdSystems {
    #[serde(default, deserialize_with = "lenient_list")]
    pub systems: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub examples: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resolution_method: Option<String>,
}

/// Geographic metadata of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceMetadata {
    #[serde(default, deserialize_with = "lenient_object")]
    pub geographic_coverage: GeographicCoverage,
    #[serde(default, deserialize_with = "lenient_list")]
    pub place_types: Vec<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub place_id_systems: PlaceIdSystems,
}

impl PlaceMetadata {
    /// True when no field carries any information
    pub fn is_empty(&self) -> bool {
        self.geographic_coverage.countries.is_empty()
            && self.geographic_coverage.regions.is_empty()
            && self.place_types.is_empty()
            && self.place_id_systems.systems.is_empty()
            && self.place_id_systems.examples.is_empty()
            && !crate::extract::response::is_present(&self.place_id_systems.resolution_method)
    }
}

/// Extracts geographic coverage from a few pages of a site
pub struct PlaceExtractor {
    crawler: Crawler,
    analyzer: Arc<dyn ContentAnalyzer>,
    max_pages: usize,
}

impl PlaceExtractor {
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

    /// Crawls the site and asks the analyzer for its geographic coverage
    ///
    /// An empty crawl or an unparsable answer yields an empty record.
    pub async fn extract(&self, url: &str) -> Result<PlaceMetadata, HarvestError> {
        let Some(content) = combined_site_text(&self.crawler, url, self.max_pages).await else {
            tracing::info!("No pages fetched from {}, skipping place analysis", url);
            return Ok(PlaceMetadata::default());
        };

        let response = self.analyzer.analyze(&content, PLACE_PROMPT).await?;

        Ok(parse_json(&response).unwrap_or_else(|e| {
            tracing::warn!("Unparsable place analysis for {}: {}", url, e);
            PlaceMetadata::default()
        }))
    }
}

#[async_trait]
impl Extractor for PlaceExtractor {
    type Output = PlaceMetadata;

    async fn extract(&self, url: &str) -> Result<PlaceMetadata, HarvestError> {
        PlaceExtractor::extract(self, url).await
    }
}
