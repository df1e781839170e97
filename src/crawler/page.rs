//! Single-page analysis
//!
//! A `Page` is created empty for a URL, filled in by `analyze`, and never
//! modified after that. Fetch and encoding failures do not abort the crawl;
//! they end analysis early and leave a warning on the page.

use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::parser::parse_html;
use crate::state::{fingerprint, PageState};
use crate::url::{resolve_link, SiteScope};
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Title reported for pages without a `<title>`
pub const DEFAULT_TITLE: &str = "No Title";

/// Declared encodings the analyzer will decode
const ACCEPTED_ENCODINGS: &[&str] = &["text/html", "text/plain", "utf-8"];

/// Encoding assumed when the response has no `Content-Type`
const FALLBACK_ENCODING: &str = "ascii";

/// Why analysis of a page stopped early
///
/// The `Display` text is what gets recorded in the page's warnings.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Returned {0}")]
    Transport(#[from] FetchError),

    #[error("Can not read {0}")]
    UnsupportedEncoding(String),
}

/// Report entry for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub word_count: usize,
}

/// One analyzed document
#[derive(Debug, Clone)]
pub struct Page {
    /// Canonical URL; identity within a crawl
    pub url: String,

    /// Site the page's links are confined to
    pub scope: SiteScope,

    pub title: String,
    pub description: String,

    /// Hash of the raw body; `None` until a body has been accepted
    pub content_fingerprint: Option<String>,

    pub word_count: usize,

    /// Canonical in-scope link targets in document order (may repeat)
    pub outbound_links: Vec<String>,

    /// Recoverable failures, human-readable
    pub warnings: Vec<String>,

    /// HTTP status of the response, if one arrived
    pub status_code: Option<u16>,

    pub state: PageState,
}

impl Page {
    pub fn new(url: impl Into<String>, scope: SiteScope) -> Self {
        Self {
            url: url.into(),
            scope,
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            content_fingerprint: None,
            word_count: 0,
            outbound_links: Vec::new(),
            warnings: Vec::new(),
            status_code: None,
            state: PageState::Pending,
        }
    }

    /// Fetches (unless `raw_html` is given) and analyzes the page
    ///
    /// # Analysis Flow
    ///
    /// 1. Fetch the URL; on transport failure warn and stop
    /// 2. Check the declared encoding; if not accepted warn and stop
    /// 3. Fingerprint the raw body
    /// 4. Strip comments, parse, count words, read title and description
    /// 5. Resolve anchors into in-scope canonical links
    ///
    /// A page that stops early keeps no fingerprint, no links and a zero
    /// word count. It is still a finished page.
    pub async fn analyze(
        &mut self,
        fetcher: &dyn Fetcher,
        raw_html: Option<&str>,
    ) -> Result<(), PageError> {
        if let Some(html) = raw_html {
            self.analyze_html(html.as_bytes());
            return Ok(());
        }

        self.state = PageState::Fetching;

        let response = match fetcher.fetch(&self.url).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.status_code = Some(response.status);
        if !(200..300).contains(&response.status) {
            self.warn(format!("HTTP {}", response.status));
        }

        let encoding = declared_encoding(response.content_type.as_deref());
        if !is_accepted_encoding(&encoding) {
            return Err(self.fail(PageError::UnsupportedEncoding(encoding)));
        }

        self.analyze_html(&response.body);
        Ok(())
    }

    /// Analyzes a body that has already been accepted
    fn analyze_html(&mut self, body: &[u8]) {
        self.content_fingerprint = Some(fingerprint(body));

        let html = String::from_utf8_lossy(body);
        let parsed = parse_html(&html);

        self.word_count = parsed.word_count;
        if let Some(title) = parsed.title {
            self.title = title;
        }
        if let Some(description) = parsed.description {
            self.description = description;
        }

        match Url::parse(&self.url) {
            Ok(page_url) => {
                self.outbound_links = parsed
                    .hrefs
                    .iter()
                    .filter_map(|href| {
                        let resolved = resolve_link(href, &page_url, &self.scope);
                        if resolved.is_none() {
                            tracing::debug!("Skipping out-of-scope link {} on {}", href, self.url);
                        }
                        resolved
                    })
                    .collect();
            }
            Err(e) => self.warn(format!("Can not resolve links: {}", e)),
        }

        self.state = PageState::Analyzed;
    }

    /// Records a warning without ending analysis
    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::warn!("{}: {}", self.url, warning);
        self.warnings.push(warning);
    }

    /// Records the error as a warning and marks the page finished
    fn fail(&mut self, error: PageError) -> PageError {
        self.warn(error.to_string());
        self.state = PageState::Warned;
        error
    }

    /// The report entry for this page
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            url: self.url.clone(),
            title: self.title.clone(),
            word_count: self.word_count,
        }
    }
}

/// The encoding a `Content-Type` header declares
///
/// The text after the last `charset=`, or the whole header when there is
/// no charset; `ascii` when the header is missing.
pub fn declared_encoding(content_type: Option<&str>) -> String {
    match content_type {
        Some(value) => value
            .rsplit("charset=")
            .next()
            .unwrap_or(value)
            .trim()
            .trim_matches('"')
            .to_string(),
        None => FALLBACK_ENCODING.to_string(),
    }
}

/// Returns true if the analyzer can decode the declared encoding
pub fn is_accepted_encoding(encoding: &str) -> bool {
    ACCEPTED_ENCODINGS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(encoding))
}
