//! Integration tests for license discovery

use crate::common::{license_prompt_for, mount_page, test_fetcher, CannedAnalyzer};
use metaharvest::analyzer::AnalyzerError;
use metaharvest::extract::{find_candidates, Confidence, LicenseExtractor};
use std::sync::Arc;
use wiremock::MockServer;

const HOME: &str = r#"<html><body>
    <h1>Regional population estimates</h1>
    <a href="/about">About</a>
    <a href="/legal">Legal</a>
    <a href="/terms-of-use">Terms of use</a>
    <a href="/open-licence">Open Government Licence</a>
    <a href="/copyright">Copyright</a>
    <a href="/licence-details">Licence details</a>
</body></html>"#;

#[tokio::test]
async fn test_candidates_are_ranked_and_capped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", HOME).await;

    let candidates = find_candidates(&test_fetcher(), &format!("{}/", base_url), 5).await;

    assert_eq!(candidates.len(), 5);
    assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    let scored: Vec<(String, i32)> = candidates
        .into_iter()
        .map(|c| (c.url.trim_start_matches(&base_url).to_string(), c.score))
        .collect();
    assert_eq!(
        scored,
        vec![
            ("/open-licence".to_string(), 10),
            ("/licence-details".to_string(), 8),
            ("/copyright".to_string(), 5),
            ("/terms-of-use".to_string(), 3),
            ("/legal".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn test_extractor_prefers_confident_finding() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let seed = format!("{}/", base_url);
    let licence_page = format!("{}/open-licence", base_url);
    let terms_page = format!("{}/terms-of-use", base_url);

    mount_page(&mock_server, "/", HOME).await;
    mount_page(&mock_server, "/open-licence", "<p>Open Government Licence v3.0</p>").await;
    mount_page(&mock_server, "/licence-details", "<p>Licence details</p>").await;
    mount_page(&mock_server, "/copyright", "<p>Crown copyright</p>").await;
    mount_page(&mock_server, "/terms-of-use", "<p>Terms of use</p>").await;

    let analyzer = Arc::new(
        CannedAnalyzer::new()
            .answer(
                license_prompt_for(&seed),
                r#"{"license_type": "Terms of Use", "license_url": null, "has_license": true, "confidence": "medium"}"#,
            )
            .answer(
                license_prompt_for(&licence_page),
                format!(
                    "```json\n{{\"license_type\": \"Open Government Licence v3.0\", \"license_url\": \"{}\", \"has_license\": true, \"confidence\": \"high\"}}\n```",
                    licence_page
                ),
            )
            .answer(license_prompt_for(&terms_page), "not json at all"),
    );

    let extractor = LicenseExtractor::new(test_fetcher(), analyzer.clone());
    let finding = extractor.extract(&seed).await.unwrap();

    assert_eq!(
        finding.license_type.as_deref(),
        Some("Open Government Licence v3.0")
    );
    assert_eq!(finding.license_url.as_deref(), Some(licence_page.as_str()));
    assert_eq!(finding.confidence, Confidence::High);
    // Seed page plus the top three candidates
    assert_eq!(analyzer.calls(), 4);
    assert_eq!(analyzer.calls_mentioning(&license_prompt_for(&terms_page)), 0);
}

#[tokio::test]
async fn test_nothing_found_falls_back_to_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let seed = format!("{}/", base_url);
    mount_page(&mock_server, "/", "<p>A dataset with no legal pages</p>").await;

    let analyzer = Arc::new(
        CannedAnalyzer::new().answer(license_prompt_for(&seed), r#"{"has_license": false}"#),
    );
    let finding = LicenseExtractor::new(test_fetcher(), analyzer)
        .extract(&seed)
        .await
        .unwrap();

    assert_eq!(finding.license_url.as_deref(), Some(seed.as_str()));
    assert_eq!(finding.license_type, None);
    assert_eq!(finding.confidence, Confidence::Low);
}

#[tokio::test]
async fn test_analyzer_failure_propagates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let seed = format!("{}/", base_url);
    mount_page(&mock_server, "/", "<p>Dataset</p>").await;

    let analyzer = Arc::new(CannedAnalyzer::new().fail(
        license_prompt_for(&seed),
        AnalyzerError::Authentication("invalid api key".to_string()),
    ));
    let error = LicenseExtractor::new(test_fetcher(), analyzer)
        .extract(&seed)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("invalid api key"));
}
