//! Shared fixtures for integration tests

use async_trait::async_trait;
use metaharvest::analyzer::{AnalyzerError, ContentAnalyzer};
use metaharvest::config::{Config, FetcherConfig};
use metaharvest::crawler::PageFetcher;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Analyzer that answers by the first rule whose needle occurs in the prompt
pub struct CannedAnalyzer {
    rules: Vec<(String, Result<String, AnalyzerError>)>,
    prompts: Mutex<Vec<String>>,
}

impl CannedAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answers prompts containing `needle` with `answer`
    pub fn answer(mut self, needle: impl Into<String>, answer: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Ok(answer.into())));
        self
    }

    /// Fails prompts containing `needle` with `error`
    pub fn fail(mut self, needle: impl Into<String>, error: AnalyzerError) -> Self {
        self.rules.push((needle.into(), Err(error)));
        self
    }

    /// Number of analyze calls so far
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Number of analyze calls whose prompt contained `needle`
    pub fn calls_mentioning(&self, needle: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|prompt| prompt.contains(needle))
            .count()
    }
}

#[async_trait]
impl ContentAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _text: &str, prompt: &str) -> Result<String, AnalyzerError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| Ok("I could not find anything.".to_string()))
    }
}

/// Prompt fragment unique to the license prompt for `page_url`
pub fn license_prompt_for(page_url: &str) -> String {
    format!("\"license_url\": \"{}\"", page_url)
}

/// Prompt fragment unique to the place prompt
pub const PLACE_NEEDLE: &str = "geographic data analyst";

/// Prompt fragment unique to the temporal prompt
pub const TEMPORAL_NEEDLE: &str = "TEMPORAL RESOLUTION";

/// Serves `html` at `page_path`
pub async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves `html` at `page_path` and requires it to be fetched exactly `times`
pub async fn mount_page_expecting(server: &MockServer, page_path: &str, html: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
        .expect(times)
        .mount(server)
        .await;
}

/// Configuration with short timeouts for local servers
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.fetcher.timeout_secs = 5;
    config
}

pub fn test_fetcher() -> PageFetcher {
    PageFetcher::new(&FetcherConfig {
        timeout_secs: 5,
        ..FetcherConfig::default()
    })
    .unwrap()
}
