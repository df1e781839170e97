//! Crawler module for page fetching and analysis
//!
//! This module contains the core crawling logic, including:
//! - The transport capability and its HTTP implementation
//! - HTML parsing, visible text extraction and tokenizing
//! - Single-page analysis
//! - Sitemap seeding
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod sitemap;
mod tokenizer;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{
    build_http_client, FetchError, FetchResponse, Fetcher, HttpFetcher, TimeoutFetcher,
};
pub use page::{
    declared_encoding, is_accepted_encoding, Page, PageError, PageSummary, DEFAULT_TITLE,
};
pub use parser::{parse_html, strip_comments, ParsedPage};
pub use sitemap::SitemapSeeder;
pub use tokenizer::{count_words, extract_text, tokenize};
