//! Configuration module for Metaharvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use metaharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("metaharvest.toml")).unwrap();
//! println!("Analyzer model: {}", config.analyzer.model);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalyzerConfig, Config, CrawlerConfig, FetcherConfig, LicenseConfig, OutputConfig,
    DEFAULT_MAX_TEXT_CHARS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config, resolve_api_key,
};
