//! Statistics over a finished crawl

use crate::crawler::{CrawlOutcome, Page};
use crate::state::PageState;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Pages that finished analysis (analyzed or warned)
    pub total_pages: usize,

    /// Pages analyzed to completion
    pub pages_analyzed: usize,

    /// Pages that stopped early on a fetch or encoding failure
    pub pages_warned: usize,

    /// Pages carrying at least one warning
    pub pages_with_warnings: usize,

    /// URLs marked visited, including any left unanalyzed by a page limit
    pub urls_visited: usize,

    /// Sum of word counts
    pub total_words: usize,

    /// Sum of outbound links (repeats included)
    pub total_links: usize,

    /// Number of duplicate-content groups
    pub duplicate_groups: usize,

    /// Pages that belong to some duplicate group
    pub duplicate_pages: usize,
}

impl CrawlStatistics {
    /// Computes statistics from a crawl outcome
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let mut stats = Self::from_pages(&outcome.pages);
        let groups = outcome.fingerprint_index.duplicate_groups();

        stats.urls_visited = outcome.visited;
        stats.duplicate_groups = groups.len();
        stats.duplicate_pages = groups.iter().map(|g| g.len()).sum();
        stats
    }

    fn from_pages(pages: &[Page]) -> Self {
        Self {
            total_pages: pages.len(),
            pages_analyzed: pages
                .iter()
                .filter(|p| p.state == PageState::Analyzed)
                .count(),
            pages_warned: pages
                .iter()
                .filter(|p| p.state == PageState::Warned)
                .count(),
            pages_with_warnings: pages.iter().filter(|p| !p.warnings.is_empty()).count(),
            total_words: pages.iter().map(|p| p.word_count).sum(),
            total_links: pages.iter().map(|p| p.outbound_links.len()).sum(),
            ..Self::default()
        }
    }

    /// Percentage of pages analyzed to completion
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.pages_analyzed as f64 / self.total_pages as f64) * 100.0
        }
    }

    /// Logs the statistics at info level
    pub fn log(&self) {
        tracing::info!(
            "Pages: {} ({} analyzed, {} warned), {} URLs visited",
            self.total_pages,
            self.pages_analyzed,
            self.pages_warned,
            self.urls_visited
        );
        tracing::info!(
            "Words: {}, outbound links: {}, duplicate groups: {} ({} pages)",
            self.total_words,
            self.total_links,
            self.duplicate_groups,
            self.duplicate_pages
        );
        tracing::info!("Success rate: {:.1}%", self.success_rate());
    }
}
