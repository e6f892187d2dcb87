//! Same-site breadth-first crawler
//!
//! The crawl loop pops URLs from a [`CrawlFrontier`], fetches each page once,
//! keeps the page text when the fetch succeeded, and queues every same-site
//! link found in the response body.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::parser::extract_links;
use crate::url::parse_http_url;
use serde::Serialize;

/// A fetched page reduced to plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// The URL the page was requested under
    pub url: String,

    /// Markup-stripped, length-capped page text (never empty)
    pub text: String,
}

/// Breadth-first, domain-restricted crawler
#[derive(Debug, Clone)]
pub struct Crawler {
    fetcher: PageFetcher,
}

impl Crawler {
    /// Creates a crawler that fetches through the given fetcher
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// The underlying page fetcher
    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    /// Crawls up to `max_pages` pages starting at `seed_url`
    ///
    /// Pages come back in BFS order from the seed. Only pages that produced
    /// text count towards `max_pages`; unavailable pages are skipped but
    /// their links (from error bodies) are still followed. Links are only
    /// followed when they resolve to the seed's network location.
    ///
    /// An unparsable seed yields an empty crawl.
    pub async fn crawl(&self, seed_url: &str, max_pages: usize) -> Vec<Page> {
        let seed = match parse_http_url(seed_url) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!("Cannot crawl {}: {}", seed_url, e);
                return Vec::new();
            }
        };

        let mut frontier = CrawlFrontier::new(seed);
        let mut pages = Vec::new();

        while pages.len() < max_pages {
            let Some(url) = frontier.next_url() else {
                break;
            };
            tracing::debug!("Processing URL: {}", url);

            let outcome = self.fetcher.fetch_page(url.as_str()).await;

            let text = self.fetcher.page_text(&outcome);
            if !text.is_empty() {
                pages.push(Page {
                    url: url.to_string(),
                    text,
                });
            }

            if let Some(body) = outcome.body() {
                for link in extract_links(body, &url) {
                    frontier.enqueue(link);
                }
            }
        }

        tracing::debug!(
            "Crawl of {} finished: {} pages kept, {} visited, {} still queued",
            seed_url,
            pages.len(),
            frontier.visited_count(),
            frontier.queue_len()
        );

        pages
    }
}
