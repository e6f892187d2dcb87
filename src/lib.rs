//! Metaharvest: dataset metadata discovery
//!
//! This crate crawls a bounded set of same-site pages starting from a seed URL,
//! asks a text-analysis service to extract license, geographic and temporal
//! metadata, and scores how trustworthy the extracted fields are.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod orchestrator;
pub mod output;
pub mod research;
pub mod url;

use thiserror::Error;

/// Main error type for Metaharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] analyzer::AnalyzerError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Environment variable {0} is not set")]
    MissingCredential(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Metaharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{AnalyzerError, ChatClient, ContentAnalyzer, RetryingAnalyzer};
pub use config::Config;
pub use crawler::{Crawler, Page, PageFetcher};
pub use extract::{LicenseExtractor, PlaceExtractor, TemporalExtractor};
pub use orchestrator::{AggregateResult, Orchestrator, ValidationResult};
