//! End-to-end tests of the orchestrated pipeline

use crate::common::{
    license_prompt_for, mount_page, test_config, CannedAnalyzer, PLACE_NEEDLE, TEMPORAL_NEEDLE,
};
use metaharvest::analyzer::{AnalyzerError, ChatClient, ChatSettings, RetryingAnalyzer};
use metaharvest::orchestrator::Orchestrator;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PLACE_ANSWER: &str = r#"{
    "geographic_coverage": {"countries": ["Canada"], "regions": ["Ontario", "Quebec"]},
    "place_types": ["Country", "Province", "Census division"],
    "place_id_systems": {
        "systems": ["Standard Geographical Classification"],
        "examples": ["35", "24", "3520"],
        "resolution_method": "SGC code tables published by the statistics office"
    }
}"#;

const TEMPORAL_ANSWER: &str = r#"```json
{
    "coverage_period": {"start_date": 2001, "end_date": "2021"},
    "update_frequency": {"frequency": "annual"},
    "last_updated": "2022-02-09",
    "temporal_resolution": "yearly"
}
```"#;

async fn mount_dataset_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><body>
            <h1>Population estimates, 2001 to 2021</h1>
            <p>Annual estimates for provinces and census divisions.</p>
            <a href="/methodology">Methodology</a>
            <a href="/open-licence">Open licence</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        server,
        "/methodology",
        "<p>Geography follows the Standard Geographical Classification.</p>",
    )
    .await;
    mount_page(server, "/open-licence", "<p>Statistics Open Licence</p>").await;
}

fn license_answer(page_url: &str) -> String {
    json!({
        "license_type": "Statistics Open Licence",
        "license_url": page_url,
        "has_license": true,
        "confidence": "high",
        "attribution": "Source: statistics office"
    })
    .to_string()
}

#[tokio::test]
async fn test_full_pipeline_scores_every_record() {
    let mock_server = MockServer::start().await;
    mount_dataset_site(&mock_server).await;
    let seed = format!("{}/", mock_server.uri());
    let licence_page = format!("{}/open-licence", mock_server.uri());

    let analyzer = Arc::new(
        CannedAnalyzer::new()
            .answer(license_prompt_for(&licence_page), license_answer(&licence_page))
            .answer(PLACE_NEEDLE, PLACE_ANSWER)
            .answer(TEMPORAL_NEEDLE, TEMPORAL_ANSWER),
    );

    let orchestrator = Orchestrator::from_config(&test_config(), analyzer.clone()).unwrap();
    let result = orchestrator.extract_metadata(&seed).await;

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.url, seed);
    assert_eq!(result.validation.license.quality_score, 100);
    assert_eq!(result.validation.place.quality_score, 100);
    assert_eq!(result.validation.temporal.quality_score, 100);
    assert_eq!(result.validation.overall_score, 100.0);

    let temporal = result.temporal.unwrap();
    assert_eq!(temporal.coverage_period.start_date.as_deref(), Some("2001"));
    assert_eq!(analyzer.calls_mentioning(PLACE_NEEDLE), 1);
    assert_eq!(analyzer.calls_mentioning(TEMPORAL_NEEDLE), 1);
}

#[tokio::test]
async fn test_place_failure_is_recorded_and_siblings_run() {
    let mock_server = MockServer::start().await;
    mount_dataset_site(&mock_server).await;
    let seed = format!("{}/", mock_server.uri());
    let licence_page = format!("{}/open-licence", mock_server.uri());

    let analyzer = Arc::new(
        CannedAnalyzer::new()
            .answer(license_prompt_for(&licence_page), license_answer(&licence_page))
            .fail(
                PLACE_NEEDLE,
                AnalyzerError::Timeout("request timed out".to_string()),
            )
            .answer(TEMPORAL_NEEDLE, TEMPORAL_ANSWER),
    );

    let orchestrator = Orchestrator::from_config(&test_config(), analyzer).unwrap();
    let result = orchestrator.extract_metadata(&seed).await;

    assert_eq!(
        result.errors,
        vec!["Place: Analyzer error: Request timed out: request timed out"]
    );
    assert!(result.place.is_none());
    assert!(result.license.is_some());
    assert!(result.temporal.is_some());
    assert_eq!(result.validation.place.quality_score, 0);
    assert_eq!(result.validation.overall_score, 66.7);
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_records() {
    let seed = "http://127.0.0.1:9/";
    let analyzer = Arc::new(CannedAnalyzer::new());

    let orchestrator = Orchestrator::from_config(&test_config(), analyzer.clone()).unwrap();
    let result = orchestrator.extract_metadata(seed).await;

    assert!(result.errors.is_empty());
    assert_eq!(analyzer.calls(), 0);
    assert_eq!(result.license.unwrap().license_url.as_deref(), Some(seed));
    assert_eq!(
        result.validation.place.warnings,
        vec!["No place information found"]
    );
    assert_eq!(
        result.validation.temporal.warnings,
        vec!["No temporal information found"]
    );
    assert_eq!(result.validation.overall_score, 10.0);
}

#[tokio::test]
async fn test_pipeline_through_chat_endpoint() {
    let mock_server = MockServer::start().await;
    mount_dataset_site(&mock_server).await;
    let seed = format!("{}/", mock_server.uri());

    let chat_answer = |content: &str| {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))
    };

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(PLACE_NEEDLE))
        .respond_with(chat_answer(PLACE_ANSWER))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(TEMPORAL_NEEDLE))
        .respond_with(chat_answer(TEMPORAL_ANSWER))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("has_license"))
        .respond_with(chat_answer(r#"{"has_license": false}"#))
        .mount(&mock_server)
        .await;

    let mut config = test_config();
    config.analyzer.endpoint = format!("{}/v1", mock_server.uri());
    let client = ChatClient::new("test-key", &config.analyzer).unwrap();
    let analyzer = RetryingAnalyzer::new(client, ChatSettings::from(&config.analyzer), 0);

    let orchestrator = Orchestrator::from_config(&config, Arc::new(analyzer)).unwrap();
    let result = orchestrator.extract_metadata(&seed).await;

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.validation.license.quality_score, 30);
    assert_eq!(result.validation.place.quality_score, 100);
    assert_eq!(result.validation.temporal.quality_score, 100);
    assert_eq!(result.validation.overall_score, 76.7);
}
