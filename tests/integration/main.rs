//! Integration tests for the crawl-extract-validate pipeline
//!
//! Sites are served by wiremock; the analysis service is either a canned
//! in-process analyzer or a wiremock chat-completions endpoint.

mod common;
mod crawl_tests;
mod license_tests;
mod pipeline_tests;
