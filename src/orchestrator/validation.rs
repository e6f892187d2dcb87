//! Quality scoring of extracted metadata
//!
//! Each record is scored against a fixed checklist out of 100 points;
//! missing key fields add a warning.

use crate::extract::{LicenseFinding, PlaceMetadata, TemporalMetadata};
use serde::Serialize;

/// Checklist score of one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// 0..=100
    pub quality_score: u32,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A zero score with a single warning
    pub fn failed(warning: impl Into<String>) -> Self {
        Self {
            quality_score: 0,
            warnings: vec![warning.into()],
        }
    }
}

/// Accumulates checklist points and warnings
#[derive(Default)]
struct Checklist {
    score: u32,
    warnings: Vec<String>,
}

impl Checklist {
    /// Awards `points` when `passed`, otherwise records `warning` if given
    fn check(&mut self, passed: bool, points: u32, warning: Option<&str>) {
        if passed {
            self.score += points;
        } else if let Some(warning) = warning {
            self.warnings.push(warning.to_string());
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            quality_score: self.score,
            warnings: self.warnings,
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Scores a license finding
///
/// | Field | Points |
/// |-------|--------|
/// | license type | 40 |
/// | license URL | 30 |
/// | attribution | 15 |
/// | confidence high / medium | 15 / 7 |
pub fn validate_license(finding: Option<&LicenseFinding>) -> ValidationResult {
    use crate::extract::Confidence;

    let Some(finding) = finding else {
        return ValidationResult::failed("No license information found");
    };

    let mut checklist = Checklist::default();
    checklist.check(finding.has_license_type(), 40, Some("License type not found"));
    checklist.check(finding.has_license_url(), 30, Some("License URL not found"));
    checklist.check(has_text(&finding.attribution), 15, None);
    checklist.check(finding.confidence == Confidence::High, 15, None);
    checklist.check(finding.confidence == Confidence::Medium, 7, None);
    checklist.finish()
}

/// Scores a place record
///
/// | Field | Points |
/// |-------|--------|
/// | countries | 25 |
/// | regions | 15 |
/// | place types | 20 |
/// | ID systems | 20 |
/// | at least 3 ID examples | 15 |
/// | ID resolution method | 5 |
pub fn validate_place(place: Option<&PlaceMetadata>) -> ValidationResult {
    let place = match place {
        Some(place) if !place.is_empty() => place,
        _ => return ValidationResult::failed("No place information found"),
    };

    let ids = &place.place_id_systems;
    let mut checklist = Checklist::default();
    checklist.check(
        !place.geographic_coverage.countries.is_empty(),
        25,
        Some("Countries not found"),
    );
    checklist.check(!place.geographic_coverage.regions.is_empty(), 15, None);
    checklist.check(!place.place_types.is_empty(), 20, Some("Place types not found"));
    checklist.check(!ids.systems.is_empty(), 20, Some("ID systems not found"));
    checklist.check(ids.examples.len() >= 3, 15, None);
    checklist.check(
        has_text(&ids.resolution_method),
        5,
        Some("ID resolution method not found"),
    );
    checklist.finish()
}

/// Scores a temporal record
///
/// | Field | Points |
/// |-------|--------|
/// | start date | 35 |
/// | end date | 35 |
/// | update frequency | 20 |
/// | temporal resolution | 10 |
pub fn validate_temporal(temporal: Option<&TemporalMetadata>) -> ValidationResult {
    let temporal = match temporal {
        Some(temporal) if !temporal.is_empty() => temporal,
        _ => return ValidationResult::failed("No temporal information found"),
    };

    let mut checklist = Checklist::default();
    checklist.check(
        has_text(&temporal.coverage_period.start_date),
        35,
        Some("Start date not found"),
    );
    checklist.check(
        has_text(&temporal.coverage_period.end_date),
        35,
        Some("End date not found"),
    );
    checklist.check(
        has_text(&temporal.update_frequency.frequency),
        20,
        Some("Update frequency not found"),
    );
    checklist.check(has_text(&temporal.temporal_resolution), 10, None);
    checklist.finish()
}

/// Mean of the three scores, rounded to one decimal place
pub fn overall_score(license: u32, place: u32, temporal: u32) -> f64 {
    let mean = f64::from(license + place + temporal) / 3.0;
    (mean * 10.0).round() / 10.0
}
