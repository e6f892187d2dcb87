//! Retrying analyzer client
//!
//! Wraps a [`ChatBackend`] with failure classification and linear backoff:
//! authentication failures return immediately, everything else is retried
//! after `(attempt + 1) * 2` seconds until the retry budget is spent.

use crate::analyzer::error::AnalyzerError;
use crate::analyzer::types::{ChatRequest, ChatSettings, Completion};
use crate::analyzer::{user_content, ChatBackend, ContentAnalyzer};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Waits between attempts
///
/// Production code sleeps on the tokio timer; tests substitute a recorder.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `tokio::time::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay before the attempt following `attempt` (0-based): 2s, 4s, 6s, ...
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs((u64::from(attempt) + 1) * 2)
}

/// Analyzer client with retry and backoff
pub struct RetryingAnalyzer<B> {
    backend: B,
    settings: ChatSettings,
    max_retries: u32,
    sleeper: Arc<dyn Sleeper>,
}

impl<B: ChatBackend> RetryingAnalyzer<B> {
    /// Wraps a backend; `max_retries` applies to [`ContentAnalyzer::analyze`]
    pub fn new(backend: B, settings: ChatSettings, max_retries: u32) -> Self {
        Self {
            backend,
            settings,
            max_retries,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replaces the sleeper used between attempts
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Model settings used to build requests
    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Retry budget used by [`ContentAnalyzer::analyze`]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// The wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends a request, retrying up to `max_retries` additional times
    ///
    /// # Retry Logic
    ///
    /// | Failure | Action |
    /// |---------|--------|
    /// | Authentication | Return immediately |
    /// | Timeout / connection | Retry after `(attempt + 1) * 2` s |
    /// | Anything else | Retry after `(attempt + 1) * 2` s |
    ///
    /// # Returns
    ///
    /// The first successful completion, or the last error once retries are
    /// exhausted.
    pub async fn call_with_retry(
        &self,
        request: &ChatRequest,
        max_retries: u32,
    ) -> Result<Completion, AnalyzerError> {
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match self.backend.complete(request).await {
                Ok(completion) => {
                    if attempt > 0 {
                        debug!(attempt = attempt, "Analyzer call succeeded after retry");
                    }
                    return Ok(completion);
                }
                Err(e) if !e.is_retryable() => {
                    warn!(error = %e, "Non-retryable analyzer error");
                    return Err(e);
                }
                Err(e) => {
                    if attempt < max_retries {
                        let delay = backoff_delay(attempt);
                        if e.is_transient() {
                            warn!(
                                attempt = attempt,
                                max_retries = max_retries,
                                delay_secs = delay.as_secs(),
                                error = %e,
                                "Transient analyzer error, retrying"
                            );
                        } else {
                            warn!(
                                attempt = attempt,
                                max_retries = max_retries,
                                error = %e,
                                "Analyzer call failed, retrying"
                            );
                        }
                        self.sleeper.sleep(delay).await;
                    } else {
                        warn!(max_retries = max_retries, error = %e, "Analyzer retries exhausted");
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(AnalyzerError::EmptyResponse))
    }
}

#[async_trait]
impl<B: ChatBackend> ContentAnalyzer for RetryingAnalyzer<B> {
    async fn analyze(&self, text: &str, prompt: &str) -> Result<String, AnalyzerError> {
        let request = self.settings.request(user_content(prompt, text));
        self.call_with_retry(&request, self.max_retries)
            .await
            .map(|completion| completion.content)
    }
}
