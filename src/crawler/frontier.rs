//! Breadth-first crawl frontier
//!
//! The frontier pairs a FIFO queue of URLs still to visit with the set of
//! URLs already visited. It enforces the domain restriction: only URLs whose
//! network location equals the seed's can ever enter the queue.

use crate::url::same_location;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Queue and visited set driving a breadth-first crawl
#[derive(Debug, Clone)]
pub struct CrawlFrontier {
    /// The seed URL anchoring the domain restriction
    seed: Url,

    /// URLs that have been dequeued for fetching
    visited: HashSet<String>,

    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<Url>,
}

impl CrawlFrontier {
    /// Creates a frontier whose queue holds only the seed
    pub fn new(seed: Url) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(seed.clone());

        Self {
            seed,
            visited: HashSet::new(),
            queue,
        }
    }

    /// The seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Pops the next unvisited URL and marks it visited
    ///
    /// Already-visited entries at the front of the queue are discarded.
    /// Returns None once the queue is exhausted.
    pub fn next_url(&mut self) -> Option<Url> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.as_str().to_string()) {
                return Some(url);
            }
        }
        None
    }

    /// Queues a discovered URL
    ///
    /// The URL is dropped when it lives on another network location or has
    /// already been visited. A URL may sit in the queue more than once; the
    /// visited check in [`CrawlFrontier::next_url`] makes the duplicate a no-op.
    ///
    /// # Returns
    ///
    /// True if the URL was queued
    pub fn enqueue(&mut self, url: Url) -> bool {
        if !same_location(&self.seed, &url) || self.is_visited(&url) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Returns true if the URL has been dequeued before
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue (duplicates included)
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is left to visit
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
