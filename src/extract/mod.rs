//! Metadata extractors
//!
//! Each extractor takes a dataset URL, gathers page text through the crawler
//! and turns the analyzer's answer into a typed record:
//!
//! - [`LicenseExtractor`] checks the seed page and its best license links
//! - [`PlaceExtractor`] asks for geographic coverage of a few crawled pages
//! - [`TemporalExtractor`] asks for temporal coverage of the same kind of crawl
//!
//! Fetch failures and unparsable answers are recovered inside the
//! extractors. Analyzer call failures are returned to the caller.

mod license;
pub mod license_links;
mod place;
mod prompts;
mod response;
mod temporal;

pub use license::{license_type_present, select_best, Confidence, LicenseExtractor, LicenseFinding};
pub use license_links::{find_candidates, score_anchor, score_license_links, LicenseLinkCandidate};
pub use place::{GeographicCoverage, PlaceExtractor, PlaceIdSystems, PlaceMetadata};
pub use response::{parse_json, strip_code_fence};
pub use temporal::{CoveragePeriod, TemporalExtractor, TemporalMetadata, UpdateFrequency};

use crate::crawler::{truncate_chars, Crawler};
use crate::HarvestError;
use async_trait::async_trait;

/// Maximum characters of combined site text sent in one analysis call
pub const MAX_COMBINED_CHARS: usize = 50_000;

/// A metadata extractor for one kind of record
#[async_trait]
pub trait Extractor: Send + Sync {
    type Output: Send;

    async fn extract(&self, url: &str) -> Result<Self::Output, HarvestError>;
}

/// Crawls `url` and joins the page texts, or `None` if nothing was fetched
pub(crate) async fn combined_site_text(
    crawler: &Crawler,
    url: &str,
    max_pages: usize,
) -> Option<String> {
    let pages = crawler.crawl(url, max_pages).await;
    if pages.is_empty() {
        return None;
    }

    let combined = pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    Some(truncate_chars(&combined, MAX_COMBINED_CHARS))
}
