//! Error types for analyzer calls.

use thiserror::Error;

/// Message fragments that mark a credentials problem
const AUTHENTICATION_MARKERS: &[&str] = &["api key", "authentication", "unauthorized", "forbidden"];

/// Message fragments that mark a transient problem
const TRANSIENT_MARKERS: &[&str] = &["timeout", "timed out", "connection", "temporary"];

/// Analyzer call errors.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerError {
    /// Credentials rejected (HTTP 401/403 or an auth-flavoured message)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection could not be established or was dropped
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx response that is not an authentication failure
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The service answered without any completion
    #[error("Analyzer returned no completion")]
    EmptyResponse,
}

impl AnalyzerError {
    /// Classifies a non-2xx HTTP response
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();

        if status == 401 || status == 403 || mentions_any(&message, AUTHENTICATION_MARKERS) {
            return Self::Authentication(format!("HTTP {}: {}", status, message));
        }

        if status == 408 || status == 504 {
            return Self::Timeout(format!("HTTP {}: {}", status, message));
        }

        Self::Api { status, message }
    }

    /// Classifies a transport-level failure
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::Connection(error.to_string())
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else if let Some(status) = error.status() {
            Self::from_status(status.as_u16(), error.to_string())
        } else {
            Self::from_message(error.to_string())
        }
    }

    /// Classifies a bare error message by the words it contains
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if mentions_any(&lower, AUTHENTICATION_MARKERS) {
            Self::Authentication(message)
        } else if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout(message)
        } else if mentions_any(&lower, TRANSIENT_MARKERS) {
            Self::Connection(message)
        } else {
            Self::Api { status: 0, message }
        }
    }

    /// Returns true for credential failures, which are never retried
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns true for timeouts and connection failures
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }

    /// Returns true if another attempt may succeed
    ///
    /// Everything except an authentication failure is retried.
    pub fn is_retryable(&self) -> bool {
        !self.is_authentication()
    }
}

fn mentions_any(message: &str, markers: &[&str]) -> bool {
    let lower = message.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}
