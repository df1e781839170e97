//! Sitemap seeding
//!
//! Pre-seeds the crawl frontier from an XML sitemap so pages nobody links to
//! still get audited. Sitemaps are read with a streaming XML reader: element
//! names are matched by local name (so `<sm:loc>` counts as `<loc>`), and
//! `<loc>` text may be plain, entity-escaped or wrapped in CDATA.

use crate::crawler::fetcher::Fetcher;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::sync::Arc;

/// Sitemap entries split by kind
#[derive(Debug, Default, PartialEq)]
struct SitemapEntries {
    /// `<loc>` values under `<url>`
    pages: Vec<String>,

    /// `<loc>` values under `<sitemap>` (sitemap index entries)
    sitemaps: Vec<String>,
}

/// Collects seed URLs from XML sitemaps through the crawl's transport
pub struct SitemapSeeder {
    fetcher: Arc<dyn Fetcher>,
}

impl SitemapSeeder {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches a sitemap body; any failure means no seeds from it
    async fn fetch_sitemap(&self, sitemap_url: &str) -> Option<String> {
        match self.fetcher.fetch(sitemap_url).await {
            Ok(response) if (200..300).contains(&response.status) => {
                Some(String::from_utf8_lossy(&response.body).into_owned())
            }
            Ok(response) => {
                tracing::warn!("Sitemap {} returned HTTP {}", sitemap_url, response.status);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to fetch sitemap {}: {}", sitemap_url, e);
                None
            }
        }
    }

    /// Collects page URLs and nested sitemap URLs from `<loc>` elements
    ///
    /// Malformed XML ends the scan; entries read before the error are kept.
    fn parse_sitemap(xml: &str) -> SitemapEntries {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = SitemapEntries::default();
        let mut open: Vec<Vec<u8>> = Vec::new();
        let mut loc: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = e.local_name().as_ref().to_vec();
                    if name == b"loc" {
                        loc = Some(String::new());
                    }
                    open.push(name);
                }
                Ok(Event::Text(text)) => {
                    if let Some(loc) = loc.as_mut() {
                        match text.unescape() {
                            Ok(value) => loc.push_str(&value),
                            Err(_) => loc.push_str(&String::from_utf8_lossy(&text)),
                        }
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(loc) = loc.as_mut() {
                        loc.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = open.pop();
                    if closed.as_deref() != Some(b"loc".as_slice()) {
                        continue;
                    }
                    let Some(value) = loc.take() else {
                        continue;
                    };
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    match open.last().map(Vec::as_slice) {
                        Some(b"url") => entries.pages.push(value.to_string()),
                        Some(b"sitemap") => entries.sitemaps.push(value.to_string()),
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    tracing::warn!(
                        "Malformed sitemap XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    );
                    break;
                }
                _ => {}
            }
        }

        entries
    }

    /// Seed URLs listed by the sitemap at `sitemap_url`
    ///
    /// A sitemap index is followed one level deep. Scope filtering is left to
    /// the coordinator.
    pub async fn seed(&self, sitemap_url: &str) -> Vec<String> {
        let Some(xml) = self.fetch_sitemap(sitemap_url).await else {
            return Vec::new();
        };

        let entries = Self::parse_sitemap(&xml);
        let mut discovered = entries.pages;

        for nested in entries.sitemaps {
            if let Some(xml) = self.fetch_sitemap(&nested).await {
                let nested_entries = Self::parse_sitemap(&xml);
                tracing::debug!("Parsed {}: {} URLs", nested, nested_entries.pages.len());
                discovered.extend(nested_entries.pages);
            }
        }

        tracing::info!("Seeded {} URLs from {}", discovered.len(), sitemap_url);
        discovered
    }
}
