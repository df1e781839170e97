//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that:
//! - Seeds the frontier with the seed URL and any extra seed URLs
//! - Dispatches frontier URLs to a bounded pool of analysis tasks
//! - Merges finished pages into the crawl state
//! - Feeds discovered same-site links back into the frontier
//!
//! Only the coordinator touches `CrawlState`. Workers get a URL and hand back
//! a finished `Page`, so no URL can be dispatched twice.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{Fetcher, TimeoutFetcher};
use crate::crawler::page::Page;
use crate::state::{CrawlState, FingerprintIndex, QueuedUrl};
use crate::url::{canonicalize, SiteScope};
use crate::SeoError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Result of a finished crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Finished pages in completion order
    pub pages: Vec<Page>,

    /// Content fingerprint to URLs
    pub fingerprint_index: FingerprintIndex,

    /// URLs marked visited, analyzed or not
    pub visited: usize,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    scope: SiteScope,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a coordinator for one crawl of the site behind `seed`
    ///
    /// Every fetch goes through a timeout of `request-timeout-secs`,
    /// whatever `fetcher` does on its own.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - seed enqueued, ready to run
    /// * `Err(SeoError)` - the configuration is invalid, or the seed is not
    ///   an http(s) URL with a host
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>, seed: &str) -> Result<Self, SeoError> {
        validate(&config)?;
        let seed_url = canonicalize(seed)?;
        let scope = SiteScope::from_url(&seed_url)?;

        let fetcher: Arc<dyn Fetcher> = Arc::new(TimeoutFetcher::new(
            fetcher,
            config.crawler.request_timeout(),
        ));

        let mut state = CrawlState::new();
        state.enqueue(seed_url.as_str(), 0);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            scope,
            state,
        })
    }

    /// Adds further seed URLs (e.g. from a sitemap) at depth 0
    ///
    /// URLs that do not parse or fall outside the seed's site are dropped.
    pub fn with_extra_seeds<S: AsRef<str>>(mut self, seeds: &[S]) -> Self {
        for seed in seeds {
            let seed = seed.as_ref();
            match canonicalize(seed) {
                Ok(url) if self.scope.contains(&url) => {
                    self.state.enqueue(url.as_str(), 0);
                }
                Ok(_) => tracing::debug!("Ignoring out-of-scope seed {}", seed),
                Err(e) => tracing::debug!("Ignoring seed {}: {}", seed, e),
            }
        }
        self
    }

    /// Runs the main crawl loop until the frontier is exhausted
    ///
    /// This is the core crawling logic that:
    /// 1. Fills the worker pool from the frontier (up to the page limit)
    /// 2. Waits for any analysis to finish
    /// 3. Records the page and enqueues its unvisited links
    pub async fn run(mut self) -> CrawlOutcome {
        let start_time = Instant::now();
        let crawler = &self.config.crawler;
        let concurrency = crawler.max_concurrent_pages_open.max(1) as usize;

        tracing::info!(
            "Starting crawl of {} ({} workers)",
            self.scope.origin(),
            concurrency
        );

        let mut in_flight: JoinSet<(Page, u32)> = JoinSet::new();
        let mut dispatched = 0usize;
        let mut pages_crawled = 0usize;

        loop {
            while in_flight.len() < concurrency && !self.page_limit_reached(dispatched) {
                let Some(queued) = self.state.next() else {
                    break;
                };
                dispatched += 1;
                self.dispatch(&mut in_flight, queued);
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok((page, depth)) => {
                    self.handle_page(page, depth);
                    pages_crawled += 1;
                }
                Err(e) => tracing::error!("Analysis task failed: {}", e),
            }

            if pages_crawled > 0 && pages_crawled % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    pages_crawled,
                    self.state.frontier_len(),
                    pages_crawled as f64 / elapsed.as_secs_f64()
                );
            }
        }

        if self.page_limit_reached(dispatched) && self.state.frontier_len() > 0 {
            tracing::info!(
                "Page limit reached, {} URLs left unanalyzed",
                self.state.frontier_len()
            );
        }

        let visited = self.state.visited_count();
        let (pages, fingerprint_index) = self.state.into_parts();
        let elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            pages.len(),
            elapsed
        );

        CrawlOutcome {
            pages,
            fingerprint_index,
            visited,
            elapsed,
        }
    }

    fn page_limit_reached(&self, dispatched: usize) -> bool {
        self.config
            .crawler
            .max_pages
            .is_some_and(|max| dispatched >= max)
    }

    /// Spawns the analysis of one frontier URL
    fn dispatch(&self, in_flight: &mut JoinSet<(Page, u32)>, queued: QueuedUrl) {
        tracing::debug!("Processing URL: {} (depth {})", queued.url, queued.depth);

        let fetcher = Arc::clone(&self.fetcher);
        let mut page = Page::new(queued.url, self.scope.clone());
        let depth = queued.depth;

        in_flight.spawn(async move {
            if let Err(e) = page.analyze(fetcher.as_ref(), None).await {
                // already recorded on the page as a warning
                tracing::debug!("Analysis of {} stopped early: {}", page.url, e);
            }
            (page, depth)
        });
    }

    /// Records a finished page and enqueues its unvisited links
    fn handle_page(&mut self, page: Page, depth: u32) {
        let crawler = &self.config.crawler;
        let next_depth = depth + 1;
        let follow = crawler.follow_links && crawler.max_depth.map_or(true, |max| next_depth <= max);

        if follow {
            for link in &page.outbound_links {
                if self.state.enqueue(link, next_depth) {
                    tracing::debug!("Discovered {} from {}", link, page.url);
                }
            }
        }

        self.state.record(page);
    }
}

/// Crawls the site behind `seed` with the given fetcher
///
/// # Example
///
/// ```no_run
/// use seo_crawl::config::Config;
/// use seo_crawl::crawler::{run_crawl, HttpFetcher};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = Arc::new(HttpFetcher::new(&config)?);
/// let outcome = run_crawl(config, fetcher, "https://example.com/").await?;
/// println!("{} pages", outcome.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    fetcher: Arc<dyn Fetcher>,
    seed: &str,
) -> Result<CrawlOutcome, SeoError> {
    Ok(Coordinator::new(config, fetcher, seed)?.run().await)
}
