//! HTML parser for extracting text, metadata and links
//!
//! The markup is parsed twice:
//! - lowercased, for visible text, `<title>` and `<meta name="description">`
//!   (lookups that are case-insensitive by convention)
//! - as written, for `<a href>` values, since URLs are case-sensitive
//!
//! Parsing uses html5ever's error-tolerant tree builder through `scraper`:
//! unclosed tags are closed implicitly, misnested elements are reparented per
//! the HTML5 algorithm, and malformed attributes are dropped. None of this is
//! reported; a page always parses to some tree.

use crate::crawler::tokenizer::{count_words, extract_text};
use regex::Regex;
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// Trimmed text of the first `<title>` element; `None` when there is none
    pub title: Option<String>,

    /// `content` of the first `<meta name="description">`
    pub description: Option<String>,

    /// Number of tokens in the visible text
    pub word_count: usize,

    /// Raw `href` values of all anchors, in document order
    pub hrefs: Vec<String>,
}

fn comment_regex() -> &'static Regex {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    COMMENT_RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"))
}

/// Removes HTML comments from raw markup
pub fn strip_comments(html: &str) -> Cow<'_, str> {
    comment_regex().replace_all(html, "")
}

/// Parses HTML content and extracts text statistics, metadata and links
///
/// # Example
///
/// ```
/// use seo_crawl::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/Page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("test".to_string()));
/// assert_eq!(parsed.hrefs, ["/Page"]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let clean = strip_comments(html);

    let folded = Html::parse_document(&clean.to_lowercase());
    let preserved = Html::parse_document(&clean);

    ParsedPage {
        title: extract_title(&folded),
        description: extract_description(&folded),
        word_count: count_words(&extract_text(&folded)),
        hrefs: extract_hrefs(&preserved),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Extracts the meta description from the HTML document
fn extract_description(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).ok()?;

    document
        .select(&meta_selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Extracts every anchor `href` from the HTML document
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        let html = "<p>keep</p><!-- drop\n this --><p>also</p><!---->";
        assert_eq!(strip_comments(html), "<p>keep</p><p>also</p>");
    }

    #[test]
    fn test_comment_text_not_counted() {
        let parsed = parse_html("<html><body><!-- secret words here -->visible text</body></html>");
        assert_eq!(parsed.word_count, 2);
    }

    #[test]
    fn test_commented_out_link_ignored() {
        let parsed =
            parse_html(r#"<body><!-- <a href="/old">old</a> --><a href="/new">new</a></body>"#);
        assert_eq!(parsed.hrefs, ["/new"]);
    }

    #[test]
    fn test_extract_title_is_case_folded() {
        let parsed = parse_html("<html><head><TITLE>  Our Bakery  </TITLE></head></html>");
        assert_eq!(parsed.title, Some("our bakery".to_string()));
    }

    #[test]
    fn test_no_title() {
        let parsed = parse_html("<html><head></head><body></body></html>");
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_empty_title_is_kept() {
        let parsed = parse_html("<html><head><title>   </title></head></html>");
        assert_eq!(parsed.title, Some(String::new()));
    }

    #[test]
    fn test_extract_description_case_insensitive_name() {
        let parsed = parse_html(
            r#"<html><head><meta name="Description" content="Fresh Bread Daily"></head></html>"#,
        );
        assert_eq!(parsed.description, Some("fresh bread daily".to_string()));
    }

    #[test]
    fn test_first_description_wins() {
        let parsed = parse_html(
            r#"<head><meta name="description" content="first"><meta name="description" content="second"></head>"#,
        );
        assert_eq!(parsed.description, Some("first".to_string()));
    }

    #[test]
    fn test_hrefs_preserve_case_and_order() {
        let parsed = parse_html(
            r#"<body><a href="/B">b</a><a>no href</a><a href="/A?Q=1">a</a><a href="/B">b again</a></body>"#,
        );
        assert_eq!(parsed.hrefs, ["/B", "/A?Q=1", "/B"]);
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let parsed = parse_html("<html><body><div><p>unclosed <b>bold <a href='/x'>link</div>");
        assert_eq!(parsed.hrefs, ["/x"]);
        assert_eq!(parsed.word_count, 3);
    }

    #[test]
    fn test_word_count_ignores_script() {
        let parsed = parse_html(
            "<html><body><p>one two</p><script>three four five</script></body></html>",
        );
        assert_eq!(parsed.word_count, 2);
    }
}
