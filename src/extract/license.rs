//! License extraction
//!
//! Checks the seed page and its best license link candidates one at a time,
//! asks the analyzer whether each page states a license, and keeps the most
//! convincing answer.

use crate::analyzer::ContentAnalyzer;
use crate::crawler::PageFetcher;
use crate::extract::license_links::find_candidates;
use crate::extract::prompts::license_prompt;
use crate::extract::response::{lenient_bool, lenient_string, parse_json};
use crate::extract::Extractor;
use crate::HarvestError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// How sure the analyzer is about a finding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Parses `high` / `medium` / `low` ignoring case and surrounding
    /// whitespace; anything else is `Low`
    pub fn parse(value: &str) -> Self {
        Self::from_exact(value.trim().to_lowercase().as_str())
    }

    fn from_exact(value: &str) -> Self {
        match value {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Analyzer JSON must spell the level exactly; `"High"` counts as `Low`
impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => Self::from_exact(&s),
            _ => Self::Low,
        })
    }
}

/// License information reported for one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseFinding {
    #[serde(default, deserialize_with = "lenient_string")]
    pub license_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub license_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_license: bool,

    #[serde(default)]
    pub confidence: Confidence,

    #[serde(default, deserialize_with = "lenient_string")]
    pub attribution: Option<String>,
}

impl LicenseFinding {
    /// The finding used when no page reports a license
    pub fn fallback(url: &str) -> Self {
        Self {
            license_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    /// True when a concrete license type was reported
    ///
    /// `None`, `""` and the literal string `"null"` all count as absent.
    pub fn has_license_type(&self) -> bool {
        license_type_present(self.license_type.as_deref())
    }

    /// True when a license URL was reported
    pub fn has_license_url(&self) -> bool {
        self.license_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    fn rank(&self) -> (bool, bool, bool) {
        (
            self.confidence == Confidence::High,
            self.has_license_type(),
            self.has_license_url(),
        )
    }
}

/// Presence test for license types: `None`, `""` and `"null"` are absent
pub fn license_type_present(license_type: Option<&str>) -> bool {
    !matches!(license_type, None | Some("") | Some("null"))
}

/// Picks the best finding, or `None` if the list is empty
///
/// Ranking prefers high confidence, then a named license type, then a
/// license URL. Ties go to the earliest finding.
pub fn select_best(findings: Vec<LicenseFinding>) -> Option<LicenseFinding> {
    let mut best: Option<LicenseFinding> = None;
    for finding in findings {
        let better = match &best {
            Some(current) => finding.rank() > current.rank(),
            None => true,
        };
        if better {
            best = Some(finding);
        }
    }
    best
}

/// Extracts license information for a dataset page
pub struct LicenseExtractor {
    fetcher: PageFetcher,
    analyzer: Arc<dyn ContentAnalyzer>,
    candidate_pages: usize,
    max_candidates: usize,
}

impl LicenseExtractor {
    pub fn new(fetcher: PageFetcher, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self {
            fetcher,
            analyzer,
            candidate_pages: 3,
            max_candidates: crate::extract::license_links::DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Sets how many candidates are checked and how many are scored
    pub fn with_limits(mut self, candidate_pages: usize, max_candidates: usize) -> Self {
        self.candidate_pages = candidate_pages;
        self.max_candidates = max_candidates;
        self
    }

    /// Finds the best license for `url`
    ///
    /// Pages that cannot be fetched or whose analysis is not valid JSON are
    /// skipped. Analyzer call failures are returned as errors.
    pub async fn extract(&self, url: &str) -> Result<LicenseFinding, HarvestError> {
        let candidates = find_candidates(&self.fetcher, url, self.max_candidates).await;

        let mut pages_to_check = vec![url.to_string()];
        pages_to_check.extend(
            candidates
                .into_iter()
                .take(self.candidate_pages)
                .map(|candidate| candidate.url),
        );

        let mut findings = Vec::new();
        for page_url in &pages_to_check {
            let content = self.fetcher.fetch(page_url).await;
            if content.is_empty() {
                tracing::debug!("Skipping {}: no text", page_url);
                continue;
            }

            let response = self
                .analyzer
                .analyze(&content, &license_prompt(page_url))
                .await?;

            match parse_json::<LicenseFinding>(&response) {
                Ok(finding) if finding.has_license => findings.push(finding),
                Ok(_) => tracing::debug!("No license reported on {}", page_url),
                Err(e) => tracing::warn!("Unparsable license analysis for {}: {}", page_url, e),
            }
        }

        tracing::info!(
            "License extraction for {}: {} pages checked, {} findings",
            url,
            pages_to_check.len(),
            findings.len()
        );

        Ok(select_best(findings).unwrap_or_else(|| LicenseFinding::fallback(url)))
    }
}

#[async_trait]
impl Extractor for LicenseExtractor {
    type Output = LicenseFinding;

    async fn extract(&self, url: &str) -> Result<LicenseFinding, HarvestError> {
        LicenseExtractor::extract(self, url).await
    }
}
