//! seo-crawl: a site crawler for SEO audits
//!
//! This crate crawls a website from a seed URL, extracts page text and
//! same-site links, and reports per-page metadata together with groups of
//! pages that serve byte-identical content.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use std::time::Instant;
use thiserror::Error;

/// Main error type for seo-crawl operations
#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutcome, Fetcher, HttpFetcher, Page};
pub use output::Report;
pub use state::{CrawlState, FingerprintIndex, PageState};
pub use crate::url::{resolve_link, SiteScope};

/// Crawls the site behind `seed` and returns the audit report
///
/// This is the serving boundary: it never fails. A crawl that cannot start
/// (invalid configuration, a seed that is not an http(s) URL, or an HTTP
/// client that cannot be built) yields an empty report whose `errors` list names the problem; every
/// page-level failure is recorded as a warning on that page instead.
///
/// # Example
///
/// ```no_run
/// use seo_crawl::{analyze_site, Config};
///
/// # async fn example() {
/// let report = analyze_site("https://example.com/", &[], Config::default()).await;
/// println!("{} pages", report.pages.len());
/// # }
/// ```
pub async fn analyze_site(seed: &str, extra_seeds: &[String], config: Config) -> Report {
    let started = Instant::now();

    if let Err(e) = crate::config::validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Report::failed(e.to_string(), started.elapsed());
    }

    let fetcher = match HttpFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return Report::failed(e.to_string(), started.elapsed());
        }
    };

    let coordinator = match Coordinator::new(config, std::sync::Arc::new(fetcher), seed) {
        Ok(c) => c.with_extra_seeds(extra_seeds),
        Err(e) => {
            tracing::error!("Cannot crawl {}: {}", seed, e);
            return Report::failed(e.to_string(), started.elapsed());
        }
    };

    let outcome = coordinator.run().await;
    Report::build(&outcome.pages, &outcome.fingerprint_index, started.elapsed())
}
