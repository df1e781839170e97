//! Configuration module for seo-crawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a default, so a crawl can run without any file.
//!
//! # Example
//!
//! ```no_run
//! use seo_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-crawl.toml")).unwrap();
//! println!("Workers: {}", config.crawler.max_concurrent_pages_open);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
