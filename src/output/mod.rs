//! Output module for crawl reports and summaries
//!
//! This module handles:
//! - Building the JSON report returned to callers
//! - Computing crawl statistics
//! - Generating markdown summaries of crawl results

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::Report;
pub use stats::CrawlStatistics;
