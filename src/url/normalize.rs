use crate::url::SiteScope;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Parses an absolute URL into its canonical form
///
/// The URL must be http(s) with a host; the fragment is dropped.
///
/// # Examples
///
/// ```
/// use seo_crawl::url::canonicalize;
///
/// let url = canonicalize("https://example.com/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn canonicalize(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves an `href` found on `page_url` into a canonical absolute URL
///
/// # Resolution Rules
///
/// | Link form | Result |
/// |-----------|--------|
/// | empty or `#frag` | the page URL itself |
/// | `//host/path` | joined with the site's scheme |
/// | `scheme:...` | kept as-is |
/// | `?query` | the page URL with its query replaced |
/// | `path` or `/path` | joined to `scheme://host`, `/` added if missing |
///
/// The fragment is always dropped. Returns `None` when the result is not an
/// http(s) URL on the crawled site, so mail, script and external links are
/// rejected.
///
/// # Examples
///
/// ```
/// use seo_crawl::url::{resolve_link, SiteScope};
/// use url::Url;
///
/// let scope = SiteScope::parse("https://example.com/").unwrap();
/// let page = Url::parse("https://example.com/blog/post").unwrap();
///
/// assert_eq!(
///     resolve_link("about#team", &page, &scope),
///     Some("https://example.com/about".to_string())
/// );
/// assert_eq!(resolve_link("http://other.example/c", &page, &scope), None);
/// ```
pub fn resolve_link(href: &str, page_url: &Url, scope: &SiteScope) -> Option<String> {
    let href = href.trim();
    let href = href.split_once('#').map_or(href, |(before, _)| before);

    let mut resolved = if href.is_empty() {
        page_url.clone()
    } else if let Some(rest) = href.strip_prefix("//") {
        Url::parse(&format!("{}://{}", scope.scheme(), rest)).ok()?
    } else {
        match Url::parse(href) {
            Ok(absolute) => absolute,
            Err(ParseError::RelativeUrlWithoutBase) => resolve_relative(href, page_url, scope)?,
            Err(_) => return None,
        }
    };

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if !scope.contains(&resolved) {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// Resolves a link with no scheme against the page or the site root
fn resolve_relative(href: &str, page_url: &Url, scope: &SiteScope) -> Option<Url> {
    if let Some(query) = href.strip_prefix('?') {
        let mut url = page_url.clone();
        url.set_query(Some(query));
        return Some(url);
    }

    let path = if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{}", href)
    };

    Url::parse(&format!("{}{}", scope.origin(), path)).ok()
}
