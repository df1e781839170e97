//! Visible text extraction and word counting

use regex::Regex;
use scraper::{Html, Node};
use std::sync::OnceLock;

/// Elements whose text never renders
const HIDDEN_CONTAINERS: &[&str] = &["style", "script"];

/// A token is a run of two or more word characters
fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Collects the visible text fragments of a parsed document
///
/// Text inside `<style>` and `<script>`, and text hanging directly off the
/// document node, is skipped. Fragments are returned in document order,
/// untrimmed.
pub fn extract_text(document: &Html) -> Vec<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };

            let visible = match node.parent().map(|p| p.value()) {
                Some(Node::Element(element)) => !HIDDEN_CONTAINERS.contains(&element.name()),
                Some(Node::Document) | None => false,
                Some(_) => true,
            };

            visible.then(|| text.to_string())
        })
        .collect()
}

/// Splits text into lowercase tokens
///
/// # Examples
///
/// ```
/// use seo_crawl::crawler::tokenize;
///
/// assert_eq!(tokenize("Hello, World! Hello again."), ["hello", "world", "hello", "again"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Counts the tokens across all fragments
///
/// Each fragment is trimmed and lowercased; empty fragments are ignored.
pub fn count_words<S: AsRef<str>>(fragments: &[S]) -> usize {
    let page_text = fragments
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    tokenize(&page_text).len()
}
