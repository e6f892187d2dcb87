//! Research queries

const LICENSE_FIELDS: &str = r#"1. License type (for example CC-BY-4.0, MIT, Open Government Licence)
2. License URL (direct link to the license page)
3. Attribution requirements, if any
4. Confidence level (high, medium or low)"#;

const PLACE_FIELDS: &str = r#"1. Geographic coverage (countries, regions, cities)
2. Place types (for example Country, State, City, PostalCode)
3. Place ID systems used (for example ISO 3166, FIPS, GeoNames)
4. Example place IDs, if available
5. How the place IDs can be resolved"#;

const TEMPORAL_FIELDS: &str = r#"1. Coverage period (start date and end date)
2. Update frequency (for example daily, monthly, annually)
3. Last updated date
4. Temporal resolution (for example daily, monthly, yearly data points)"#;

const LICENSE_SHAPE: &str = r#"{"license_type": "...", "license_url": "...", "has_license": true, "confidence": "high|medium|low", "attribution": "..."}"#;

const PLACE_SHAPE: &str = r#"{"geographic_coverage": {"countries": [], "regions": []}, "place_types": [], "place_id_systems": {"systems": [], "examples": [], "resolution_method": "..."}}"#;

const TEMPORAL_SHAPE: &str = r#"{"coverage_period": {"start_date": "...", "end_date": "..."}, "update_frequency": {"frequency": "..."}, "last_updated": "...", "temporal_resolution": "..."}"#;

pub(crate) fn license_query(url: &str) -> String {
    format!(
        "Analyze this dataset URL and extract license information: {url}\n\n\
         Please provide:\n{LICENSE_FIELDS}\n\n\
         Search through multiple pages if needed to find accurate license information.\n\
         Return ONLY JSON shaped like:\n{LICENSE_SHAPE}"
    )
}

pub(crate) fn place_query(url: &str) -> String {
    format!(
        "Analyze this dataset URL and extract geographic coverage information: {url}\n\n\
         Please provide:\n{PLACE_FIELDS}\n\n\
         Search documentation, metadata and data dictionary pages.\n\
         Return ONLY JSON shaped like:\n{PLACE_SHAPE}"
    )
}

pub(crate) fn temporal_query(url: &str) -> String {
    format!(
        "Analyze this dataset URL and extract temporal coverage information: {url}\n\n\
         Please provide:\n{TEMPORAL_FIELDS}\n\n\
         Search documentation and metadata sections.\n\
         Return ONLY JSON shaped like:\n{TEMPORAL_SHAPE}"
    )
}

pub(crate) fn all_query(url: &str) -> String {
    format!(
        "Analyze this dataset URL and extract comprehensive metadata: {url}\n\n\
         LICENSE INFORMATION:\n{LICENSE_FIELDS}\n\n\
         GEOGRAPHIC COVERAGE:\n{PLACE_FIELDS}\n\n\
         TEMPORAL COVERAGE:\n{TEMPORAL_FIELDS}\n\n\
         Use browser automation to search through multiple pages, documentation, \
         metadata sections and related links.\n\
         Return ONLY JSON shaped like:\n\
         {{\"license\": {LICENSE_SHAPE}, \"place\": {PLACE_SHAPE}, \"temporal\": {TEMPORAL_SHAPE}}}"
    )
}
