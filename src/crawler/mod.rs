//! Crawler module for page fetching and same-site traversal
//!
//! This module contains the page-level plumbing of the pipeline, including:
//! - HTTP fetching with failure-to-empty-text semantics
//! - HTML text and anchor extraction
//! - The breadth-first frontier with its domain restriction
//! - The crawl loop itself

mod fetcher;
mod frontier;
mod parser;
mod site;

pub use fetcher::{build_http_client, FetchOutcome, PageFetcher};
pub use frontier::CrawlFrontier;
pub use parser::{extract_anchors, extract_links, extract_text, truncate_chars, Anchor};
pub use site::{Crawler, Page};
