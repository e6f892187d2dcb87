//! License link discovery
//!
//! Finds anchors on a page that probably lead to license or terms pages and
//! ranks them by how specific their wording is.

use crate::crawler::{extract_anchors, FetchOutcome, PageFetcher};
use crate::url::{parse_http_url, resolve_link};
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Default maximum length of a candidate list
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Words that make an anchor a license link candidate
const QUALIFYING_KEYWORDS: &[&str] = &["license", "licence", "copyright", "terms", "legal"];

/// Score tiers, checked in order; the first matching tier wins
const SCORE_TIERS: &[(&[&str], i32)] = &[
    (&["open-licence", "open-license"], 10),
    (&["licence", "license"], 8),
    (&["copyright"], 5),
    (&["terms"], 3),
];

/// A link that likely points to license information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseLinkCandidate {
    pub url: String,
    pub score: i32,
}

/// Scores a single anchor, or returns `None` if it does not qualify
///
/// Anchors that only mention "legal" qualify with a score of 0.
pub fn score_anchor(href: &str, text: &str) -> Option<i32> {
    let href = href.to_lowercase();
    let text = text.to_lowercase();

    let qualifies = QUALIFYING_KEYWORDS
        .iter()
        .any(|keyword| href.contains(keyword) || text.contains(keyword));
    if !qualifies {
        return None;
    }

    let combined = format!("{} {}", href, text);
    let score = SCORE_TIERS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(_, score)| *score)
        .unwrap_or(0);

    Some(score)
}

/// Scores the license links of an already-fetched HTML document
///
/// Returns at most `max_candidates` entries, highest score first. Links are
/// resolved against `base_url` and deduplicated by URL, keeping the score of
/// the first occurrence; equal scores keep document order.
pub fn score_license_links(
    html: &str,
    base_url: &Url,
    max_candidates: usize,
) -> Vec<LicenseLinkCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for anchor in extract_anchors(html) {
        let Some(score) = score_anchor(&anchor.href, &anchor.text) else {
            continue;
        };
        let Some(url) = resolve_link(&anchor.href, base_url) else {
            continue;
        };

        let url = url.to_string();
        if seen.insert(url.clone()) {
            candidates.push(LicenseLinkCandidate { url, score });
        }
    }

    // sort_by is stable
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(max_candidates);
    candidates
}

/// Fetches `url` and returns its ranked license link candidates
///
/// A page that cannot be fetched, answers with a non-2xx status, or has an
/// unparsable URL yields an empty list.
pub async fn find_candidates(
    fetcher: &PageFetcher,
    url: &str,
    max_candidates: usize,
) -> Vec<LicenseLinkCandidate> {
    let base_url = match parse_http_url(url) {
        Ok(base_url) => base_url,
        Err(e) => {
            tracing::warn!("Cannot search {} for license links: {}", url, e);
            return Vec::new();
        }
    };

    let body = match fetcher.fetch_page(url).await {
        FetchOutcome::Success { body, .. } => body,
        FetchOutcome::HttpError { status_code, .. } => {
            tracing::debug!("No license links on {}: HTTP {}", url, status_code);
            return Vec::new();
        }
        FetchOutcome::NetworkError { .. } => return Vec::new(),
    };

    let candidates = score_license_links(&body, &base_url, max_candidates);
    tracing::debug!("Found {} license link candidates on {}", candidates.len(), url);
    candidates
}
