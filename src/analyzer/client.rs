//! OpenAI-compatible chat completion client
//!
//! The production [`ContentAnalyzer`]: one POST to `{base_url}/chat/completions`
//! per call, bearer-token authenticated, answer taken from the first choice.

use crate::analyzer::error::AnalyzerError;
use crate::analyzer::types::{ChatRequest, ChatResponseRaw, ChatSettings, Completion};
use crate::analyzer::{user_content, ChatBackend, ContentAnalyzer};
use crate::config::AnalyzerConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Chat completion client for the text-analysis service
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    settings: ChatSettings,
}

impl ChatClient {
    /// Creates a client for the endpoint and model named in the config
    pub fn new(api_key: impl Into<String>, config: &AnalyzerConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            settings: ChatSettings::from(config),
        })
    }

    /// Set a custom base URL (for proxies, mock servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Model settings used for [`ContentAnalyzer::analyze`] requests
    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, AnalyzerError> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Analyzer request failed");
                AnalyzerError::from_reqwest(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Analyzer API error");
            return Err(AnalyzerError::from_status(status.as_u16(), error_text));
        }

        let chat_response: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Parse(e.to_string()))?;

        let completion = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| Completion::from(choice.message))
            .ok_or(AnalyzerError::EmptyResponse)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Analyzer chat completion"
        );

        Ok(completion)
    }
}

#[async_trait]
impl ContentAnalyzer for ChatClient {
    async fn analyze(&self, text: &str, prompt: &str) -> Result<String, AnalyzerError> {
        let request = self.settings.request(user_content(prompt, text));
        self.complete(&request).await.map(|completion| completion.content)
    }
}
