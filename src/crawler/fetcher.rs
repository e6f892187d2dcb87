//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for page content, including:
//! - Building HTTP clients with a browser-like user agent
//! - GET requests with a fixed timeout
//! - Error classification into fetch outcomes
//! - Reducing a fetched page to bounded plain text
//!
//! Fetch failures never escape this module as errors: callers see either a
//! failed [`FetchOutcome`] or empty text and move on to the next page.

use crate::config::FetcherConfig;
use crate::crawler::parser::extract_text;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Successfully fetched the page (2xx)
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// Whatever body came with the error response
        body: String,
    },

    /// Network error (connection refused, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns true for a 2xx response
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the body of any received response
    ///
    /// Error pages still carry anchors, so link discovery reads them too.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body, .. } | Self::HttpError { body, .. } => Some(body),
            Self::NetworkError { .. } => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```
/// use metaharvest::config::FetcherConfig;
/// use metaharvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages and reduces them to plain text
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    max_text_chars: usize,
}

impl PageFetcher {
    /// Creates a fetcher with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            max_text_chars: config.max_text_chars,
        })
    }

    /// Creates a fetcher around an existing HTTP client
    pub fn with_client(client: Client, max_text_chars: usize) -> Self {
        Self {
            client,
            max_text_chars,
        }
    }

    /// Maximum number of characters returned by [`PageFetcher::fetch`]
    pub fn max_text_chars(&self) -> usize {
        self.max_text_chars
    }

    /// Fetches a URL and classifies the response
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | HTTP 2xx | Success |
    /// | Other HTTP status | HttpError (body kept) |
    /// | Timeout / connection failure | NetworkError |
    /// | Unreadable body | NetworkError |
    pub async fn fetch_page(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                tracing::debug!("Fetch failed for {}: {}", url, error);
                return FetchOutcome::NetworkError { error };
            }
        };

        let status = response.status();
        let final_url = response.url().to_string();

        match response.text().await {
            Ok(body) if status.is_success() => FetchOutcome::Success {
                final_url,
                status_code: status.as_u16(),
                body,
            },
            Ok(body) => {
                tracing::debug!("HTTP {} for {}", status.as_u16(), url);
                FetchOutcome::HttpError {
                    status_code: status.as_u16(),
                    body,
                }
            }
            Err(e) => FetchOutcome::NetworkError {
                error: e.to_string(),
            },
        }
    }

    /// Reduces a fetch outcome to page text
    ///
    /// Anything other than a 2xx response yields an empty string.
    pub fn page_text(&self, outcome: &FetchOutcome) -> String {
        match outcome {
            FetchOutcome::Success { body, .. } => extract_text(body, self.max_text_chars),
            _ => String::new(),
        }
    }

    /// Fetches a URL and returns its visible text
    ///
    /// Returns an empty string when the page is unavailable; callers treat
    /// that as "skip this page".
    pub async fn fetch(&self, url: &str) -> String {
        let outcome = self.fetch_page(url).await;
        self.page_text(&outcome)
    }
}
