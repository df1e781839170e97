//! The JSON audit report returned to callers

use crate::crawler::{Page, PageSummary};
use crate::state::FingerprintIndex;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Crawl report in the shape the serving layer returns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// One entry per analyzed page, in completion order
    pub pages: Vec<PageSummary>,

    /// Groups of URLs that served identical content
    pub duplicate_pages: Vec<Vec<String>>,

    /// Reserved; keyword scoring is not performed
    pub keywords: Vec<String>,

    /// Crawl-level errors; page-level problems live on the pages
    pub errors: Vec<String>,

    /// Seconds from crawl start to report assembly
    pub total_time: f64,
}

impl Report {
    /// Assembles the report for a finished crawl
    ///
    /// Only fingerprints shared by two or more URLs become duplicate groups.
    /// Groups are ordered by where their first URL appears in `pages`.
    pub fn build(pages: &[Page], fingerprint_index: &FingerprintIndex, elapsed: Duration) -> Self {
        let position: HashMap<&str, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.url.as_str(), i))
            .collect();

        let mut groups: Vec<&[String]> = fingerprint_index.duplicate_groups();
        groups.sort_by_key(|group| {
            group
                .first()
                .and_then(|url| position.get(url.as_str()))
                .copied()
                .unwrap_or(usize::MAX)
        });

        Self {
            pages: pages.iter().map(Page::summary).collect(),
            duplicate_pages: groups.into_iter().map(<[String]>::to_vec).collect(),
            keywords: Vec::new(),
            errors: Vec::new(),
            total_time: elapsed.as_secs_f64(),
        }
    }

    /// A report for a crawl that could not start
    pub fn failed(error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            pages: Vec::new(),
            duplicate_pages: Vec::new(),
            keywords: Vec::new(),
            errors: vec![error.into()],
            total_time: elapsed.as_secs_f64(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
