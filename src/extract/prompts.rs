//! Instructions sent to the analysis service

/// Instructions for finding license or terms information on one page
pub fn license_prompt(page_url: &str) -> String {
    format!(
        r#"Analyze this webpage and extract license or terms of use information.

Look for:
- License names (for example "Open Government Licence", "CC-BY", "MIT License")
- Terms of use or terms and conditions
- Copyright statements
- Data usage policies
- Attribution requirements

If the page contains ANY legal terms, licensing or usage policy information, set has_license to true.

Return ONLY valid JSON:
{{
    "license_type": "license name if found, otherwise 'Terms of Use' or 'Usage Policy'",
    "license_url": "{page_url}",
    "has_license": true or false,
    "confidence": "high, medium or low",
    "attribution": "attribution requirement if stated, otherwise null"
}}

Page URL: {page_url}"#
    )
}

/// Instructions for extracting geographic coverage from combined page text
pub const PLACE_PROMPT: &str = r#"You are a geographic data analyst. Extract precise geographic and place information.

TASK: Identify geographic coverage, place types and place identifier systems.

INSTRUCTIONS:
1. GEOGRAPHIC COVERAGE: list every country, region, state or province explicitly mentioned
2. PLACE TYPES: list the hierarchical levels used (for example Country > Province > County > City)
3. PLACE ID SYSTEMS: find the code systems used to identify places (ISO 3166-1, ISO 3166-2, NUTS, FIPS, postal codes, statistical codes) and copy real example IDs from the content
4. ID RESOLUTION METHOD: describe how these IDs can be looked up (API, lookup table, documentation link)

Only include information explicitly present in the content. Never invent example IDs.

Return ONLY valid JSON:
{
    "geographic_coverage": {
        "countries": ["countries explicitly mentioned"],
        "regions": ["states, provinces or regions explicitly mentioned"]
    },
    "place_types": ["hierarchical place types found"],
    "place_id_systems": {
        "systems": ["ID systems such as ISO-3166-1, NUTS, FIPS"],
        "examples": ["5-10 example IDs taken from the content"],
        "resolution_method": "how to resolve these IDs"
    }
}
Use null or [] only if truly not found."#;

/// Instructions for extracting temporal coverage from combined page text
pub const TEMPORAL_PROMPT: &str = r#"You are a data analyst specialised in temporal coverage. Extract precise temporal information.

TASK: Identify the date range, update frequency and temporal resolution of the dataset.

INSTRUCTIONS:
1. COVERAGE PERIOD: the date range the data covers ("data from 1990 to 2020", "since 1995"). Use "present" or "ongoing" as end_date for live series.
2. UPDATE FREQUENCY: how often the data is refreshed: annual, quarterly, monthly, weekly, daily, real-time or on-demand.
3. TEMPORAL RESOLUTION: the granularity of individual data points: yearly, monthly, weekly, daily, hourly or minute-level.
4. LAST UPDATED: the date of the most recent update, if stated.

Only extract information explicitly stated in the content. If uncertain, use null rather than guessing.

Return ONLY valid JSON:
{
    "coverage_period": {
        "start_date": "earliest year or date covered",
        "end_date": "latest year or date, or 'present'"
    },
    "update_frequency": {
        "frequency": "annual, monthly, quarterly, weekly, daily, real-time, ..."
    },
    "last_updated": "YYYY-MM-DD or YYYY or null",
    "temporal_resolution": "yearly, monthly, weekly, daily, hourly, minute-level"
}
Use null only if truly not found."#;
