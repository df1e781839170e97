//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: lifecycle of a single page (pending, fetching, analyzed, warned)
//! - `FingerprintIndex`: content fingerprint to URLs, for duplicate detection
//! - `CrawlState`: frontier, visited set, fingerprint index and finished pages
//!   for one crawl invocation

mod crawl_state;
mod fingerprint;
mod page_state;

// Re-export main types
pub use crawl_state::{CrawlState, QueuedUrl};
pub use fingerprint::{fingerprint, FingerprintIndex};
pub use page_state::PageState;
