//! URL handling module for seo-crawl
//!
//! This module resolves the links found on a page into canonical absolute
//! URLs and decides whether they belong to the crawled site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, SiteScope};
pub use normalize::{canonicalize, resolve_link};
