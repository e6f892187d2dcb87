//! Text-analysis service boundary
//!
//! The pipeline talks to the analysis service through [`ContentAnalyzer`]:
//! page text plus instructions in, completion text out. Nothing about the
//! shape of the answer is guaranteed; callers parse it themselves.
//!
//! - [`ChatClient`] is the production implementation (OpenAI-compatible API)
//! - [`RetryingAnalyzer`] adds failure classification and linear backoff
//! - [`ChatBackend`] is the raw request seam both of them sit on

mod client;
mod error;
mod retry;
mod types;

pub use client::ChatClient;
pub use error::AnalyzerError;
pub use retry::{backoff_delay, RetryingAnalyzer, Sleeper, TokioSleeper};
pub use types::{ChatRequest, ChatSettings, Completion, Message};

use async_trait::async_trait;

/// Sends page text and instructions to the analysis service
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Returns the service's text completion for `prompt` applied to `text`
    async fn analyze(&self, text: &str, prompt: &str) -> Result<String, AnalyzerError>;
}

/// Sends one fully-built chat request
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, AnalyzerError>;
}

/// Builds the single user message sent for an analysis call
pub fn user_content(prompt: &str, text: &str) -> String {
    format!("{}\n\nContent:\n{}", prompt, text)
}
