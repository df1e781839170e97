//! Per-crawl traversal state
//!
//! One `CrawlState` belongs to exactly one crawl invocation. It is owned by
//! the coordinator task; workers never touch it, so marking a URL visited and
//! enqueueing it happen in the same call.

use crate::crawler::Page;
use crate::state::FingerprintIndex;
use std::collections::{HashSet, VecDeque};

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Canonical URL to analyze
    pub url: String,

    /// Link distance from the nearest seed
    pub depth: u32,
}

/// Frontier, visited set, fingerprint index and finished pages
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: VecDeque<QueuedUrl>,
    fingerprint_index: FingerprintIndex,
    pages: Vec<Page>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` visited and appends it to the frontier
    ///
    /// Returns false, leaving the frontier untouched, if the URL was already
    /// visited. A URL is therefore enqueued at most once per crawl.
    pub fn enqueue(&mut self, url: &str, depth: u32) -> bool {
        if !self.visited.insert(url.to_string()) {
            return false;
        }

        self.frontier.push_back(QueuedUrl {
            url: url.to_string(),
            depth,
        });
        true
    }

    /// Pops the oldest frontier entry (breadth-first order)
    pub fn next(&mut self) -> Option<QueuedUrl> {
        self.frontier.pop_front()
    }

    /// Stores a finished page and merges its fingerprint
    ///
    /// Pages without a fingerprint (fetch or encoding failure) are kept but
    /// never take part in duplicate detection.
    pub fn record(&mut self, page: Page) {
        debug_assert!(page.state.is_terminal(), "{} recorded unfinished", page.url);
        if let Some(fp) = page.content_fingerprint.as_deref() {
            self.fingerprint_index.insert(fp, &page.url);
        }
        self.pages.push(page);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Consumes the state, keeping what the report needs
    pub fn into_parts(self) -> (Vec<Page>, FingerprintIndex) {
        (self.pages, self.fingerprint_index)
    }
}
