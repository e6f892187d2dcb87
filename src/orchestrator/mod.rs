//! Extraction pipeline
//!
//! The [`Orchestrator`] runs the license, place and temporal extractors one
//! after another, isolates their failures and scores what they found.

mod validation;

pub use validation::{
    overall_score, validate_license, validate_place, validate_temporal, ValidationResult,
};

use crate::analyzer::ContentAnalyzer;
use crate::config::Config;
use crate::crawler::{Crawler, PageFetcher};
use crate::extract::{
    Extractor, LicenseExtractor, LicenseFinding, PlaceExtractor, PlaceMetadata,
    TemporalExtractor, TemporalMetadata,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Per-record scores plus their rounded mean
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub license: ValidationResult,
    pub place: ValidationResult,
    pub temporal: ValidationResult,
    pub overall_score: f64,
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub url: String,
    pub license: Option<LicenseFinding>,
    pub place: Option<PlaceMetadata>,
    pub temporal: Option<TemporalMetadata>,
    pub validation: ValidationSummary,
    /// `"<Kind>: <message>"` for every extractor that failed
    pub errors: Vec<String>,
    /// Wall-clock seconds for the whole run
    pub execution_time: f64,
}

/// Runs the three extractors against one URL
pub struct Orchestrator {
    license: Box<dyn Extractor<Output = LicenseFinding>>,
    place: Box<dyn Extractor<Output = PlaceMetadata>>,
    temporal: Box<dyn Extractor<Output = TemporalMetadata>>,
}

impl Orchestrator {
    /// Creates an orchestrator from explicit extractors
    pub fn new(
        license: Box<dyn Extractor<Output = LicenseFinding>>,
        place: Box<dyn Extractor<Output = PlaceMetadata>>,
        temporal: Box<dyn Extractor<Output = TemporalMetadata>>,
    ) -> Self {
        Self {
            license,
            place,
            temporal,
        }
    }

    /// Builds the standard extractors from configuration
    ///
    /// All three share one HTTP client and the given analyzer.
    pub fn from_config(
        config: &Config,
        analyzer: Arc<dyn ContentAnalyzer>,
    ) -> Result<Self, reqwest::Error> {
        let fetcher = PageFetcher::new(&config.fetcher)?;
        let crawler = Crawler::new(fetcher.clone());

        let license = LicenseExtractor::new(fetcher, analyzer.clone()).with_limits(
            config.license.candidate_pages,
            config.license.max_candidates,
        );
        let place = PlaceExtractor::new(crawler.clone(), analyzer.clone())
            .with_max_pages(config.crawler.max_pages);
        let temporal =
            TemporalExtractor::new(crawler, analyzer).with_max_pages(config.crawler.max_pages);

        Ok(Self::new(
            Box::new(license),
            Box::new(place),
            Box::new(temporal),
        ))
    }

    /// Extracts and scores all metadata for `url`
    ///
    /// Never fails: an extractor error is recorded in `errors`, its record
    /// stays absent and its score is 0 with the error as the only warning.
    pub async fn extract_metadata(&self, url: &str) -> AggregateResult {
        let start = Instant::now();
        let mut errors = Vec::new();

        tracing::info!("Extracting license information from {}", url);
        let (license, license_validation) = match self.license.extract(url).await {
            Ok(finding) => {
                let validation = validate_license(Some(&finding));
                (Some(finding), validation)
            }
            Err(e) => record_failure("License", e, &mut errors),
        };

        tracing::info!("Extracting place information from {}", url);
        let (place, place_validation) = match self.place.extract(url).await {
            Ok(place) => {
                let validation = validate_place(Some(&place));
                (Some(place), validation)
            }
            Err(e) => record_failure("Place", e, &mut errors),
        };

        tracing::info!("Extracting temporal information from {}", url);
        let (temporal, temporal_validation) = match self.temporal.extract(url).await {
            Ok(temporal) => {
                let validation = validate_temporal(Some(&temporal));
                (Some(temporal), validation)
            }
            Err(e) => record_failure("Temporal", e, &mut errors),
        };

        let overall = overall_score(
            license_validation.quality_score,
            place_validation.quality_score,
            temporal_validation.quality_score,
        );

        let execution_time = start.elapsed().as_secs_f64();
        tracing::info!(
            "Extraction for {} finished in {:.2}s, overall score {}",
            url,
            execution_time,
            overall
        );

        AggregateResult {
            url: url.to_string(),
            license,
            place,
            temporal,
            validation: ValidationSummary {
                license: license_validation,
                place: place_validation,
                temporal: temporal_validation,
                overall_score: overall,
            },
            errors,
            execution_time,
        }
    }
}

fn record_failure<T>(
    kind: &str,
    error: crate::HarvestError,
    errors: &mut Vec<String>,
) -> (Option<T>, ValidationResult) {
    let message = error.to_string();
    tracing::warn!("{} extraction failed: {}", kind, message);
    errors.push(format!("{}: {}", kind, message));
    (None, ValidationResult::failed(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerError;
    use crate::extract::Confidence;
    use crate::HarvestError;
    use async_trait::async_trait;

    struct Fixed<T>(T);

    #[async_trait]
    impl<T: Clone + Send + Sync + 'static> Extractor for Fixed<T> {
        type Output = T;

        async fn extract(&self, _url: &str) -> Result<T, HarvestError> {
            Ok(self.0.clone())
        }
    }

    struct Failing<T>(std::marker::PhantomData<T>);

    impl<T> Failing<T> {
        fn boxed() -> Box<Self> {
            Box::new(Self(std::marker::PhantomData))
        }
    }

    #[async_trait]
    impl<T: Send + Sync + 'static> Extractor for Failing<T> {
        type Output = T;

        async fn extract(&self, _url: &str) -> Result<T, HarvestError> {
            Err(AnalyzerError::Connection("connection reset".to_string()).into())
        }
    }

    fn license() -> LicenseFinding {
        LicenseFinding {
            license_type: Some("CC-BY-4.0".to_string()),
            license_url: Some("https://example.org/licence".to_string()),
            has_license: true,
            confidence: Confidence::Medium,
            attribution: None,
        }
    }

    fn temporal() -> TemporalMetadata {
        serde_json::from_str(
            r#"{"coverage_period": {"start_date": "2001", "end_date": "2021"},
                "update_frequency": {"frequency": "annual"}}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_place_failure_is_isolated() {
        let orchestrator = Orchestrator::new(
            Box::new(Fixed(license())),
            Failing::<PlaceMetadata>::boxed(),
            Box::new(Fixed(temporal())),
        );

        let result = orchestrator.extract_metadata("https://example.org").await;

        assert_eq!(
            result.errors,
            vec!["Place: Analyzer error: Connection error: connection reset"]
        );
        assert!(result.license.is_some());
        assert!(result.temporal.is_some());
        assert!(result.place.is_none());
        assert_eq!(result.validation.place.quality_score, 0);
        assert_eq!(
            result.validation.place.warnings,
            vec!["Analyzer error: Connection error: connection reset"]
        );
        assert_eq!(result.validation.license.quality_score, 77);
        assert_eq!(result.validation.temporal.quality_score, 90);
        assert_eq!(result.validation.overall_score, 55.7);
    }

    #[tokio::test]
    async fn test_all_failures_still_produce_result() {
        let orchestrator = Orchestrator::new(
            Failing::<LicenseFinding>::boxed(),
            Failing::<PlaceMetadata>::boxed(),
            Failing::<TemporalMetadata>::boxed(),
        );

        let result = orchestrator.extract_metadata("https://example.org").await;

        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].starts_with("License: "));
        assert!(result.errors[1].starts_with("Place: "));
        assert!(result.errors[2].starts_with("Temporal: "));
        assert_eq!(result.validation.overall_score, 0.0);
        assert!(result.execution_time >= 0.0);
    }

    #[tokio::test]
    async fn test_empty_records_score_zero() {
        let orchestrator = Orchestrator::new(
            Box::new(Fixed(LicenseFinding::fallback("https://example.org"))),
            Box::new(Fixed(PlaceMetadata::default())),
            Box::new(Fixed(TemporalMetadata::default())),
        );

        let result = orchestrator.extract_metadata("https://example.org").await;

        assert!(result.errors.is_empty());
        assert_eq!(result.validation.license.quality_score, 30);
        assert_eq!(
            result.validation.place.warnings,
            vec!["No place information found"]
        );
        assert_eq!(result.validation.overall_score, 10.0);
    }

    #[test]
    fn test_result_serializes_with_null_records() {
        let result = AggregateResult {
            url: "https://example.org".to_string(),
            license: None,
            place: None,
            temporal: None,
            validation: ValidationSummary {
                license: ValidationResult::failed("x"),
                place: ValidationResult::failed("y"),
                temporal: ValidationResult::failed("z"),
                overall_score: 0.0,
            },
            errors: vec!["License: x".to_string()],
            execution_time: 0.5,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["license"].is_null());
        assert_eq!(json["validation"]["place"]["quality_score"], 0);
        assert_eq!(json["errors"][0], "License: x");
    }
}
