//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use seo_crawl::config::Config;
use seo_crawl::crawler::{run_crawl, Coordinator, HttpFetcher};
use seo_crawl::output::Report;
use seo_crawl::state::PageState;
use seo_crawl::analyze_site;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short timeout
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.max_concurrent_pages_open = 4;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn fetcher(config: &Config) -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new(config).expect("Failed to build HTTP client"))
}

/// Mounts an HTML page at `route`
async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// Returns a TCP port with nothing listening on it
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <p>Welcome to the bakery</p>
        <a href="/b">Bread</a>
        <a href="https://external.invalid/c">Elsewhere</a>
        </body></html>"#,
    )
    .await;

    mount_html(
        &mock_server,
        "/b",
        r#"<html><head><title>Bread</title></head><body>
        <p>Sourdough every morning</p>
        <a href="/">Home</a>
        </body></html>"#,
    )
    .await;

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 2, "Expected home and /b only");
    assert_eq!(outcome.visited, 2, "External link must never enter the frontier");
    assert!(outcome
        .pages
        .iter()
        .all(|p| p.state == PageState::Analyzed && p.warnings.is_empty()));
    assert!(outcome
        .pages
        .iter()
        .all(|p| !p.url.contains("external.invalid")));

    let home = outcome
        .pages
        .iter()
        .find(|p| p.url == format!("{}/", base_url))
        .expect("Home page missing");
    assert_eq!(home.title, "home");
    assert_eq!(home.outbound_links, [format!("{}/b", base_url)]);
    assert_eq!(home.status_code, Some(200));

    let report = Report::build(&outcome.pages, &outcome.fingerprint_index, outcome.elapsed);
    assert!(report.duplicate_pages.is_empty());
    assert!(report.keywords.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_identical_pages_are_grouped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let same = r#"<html><head><title>Same</title></head><body><a href="/a">A</a><a href="/b">B</a></body></html>"#;

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/a", same).await;
    mount_html(&mock_server, "/b", same).await;

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");
    let report = Report::build(&outcome.pages, &outcome.fingerprint_index, outcome.elapsed);

    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.duplicate_pages.len(), 1);

    let mut group = report.duplicate_pages[0].clone();
    group.sort();
    assert_eq!(group, [format!("{}/a", base_url), format!("{}/b", base_url)]);
}

#[tokio::test]
async fn test_seed_duplicated_by_discovered_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let body = r#"<html><head><title>Home</title></head><body><a href="/b">Same again</a></body></html>"#;
    mount_html(&mock_server, "/", body).await;
    mount_html(&mock_server, "/b", body).await;

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");
    let report = Report::build(&outcome.pages, &outcome.fingerprint_index, outcome.elapsed);

    assert_eq!(report.pages.len(), 2);
    assert_eq!(
        report.duplicate_pages,
        [[format!("{}/", base_url), format!("{}/b", base_url)]]
    );
}

#[tokio::test]
async fn test_analyze_site_invalid_config() {
    let mut config = create_test_config();
    config.crawler.request_timeout_secs = 0;

    let report = analyze_site("https://example.com/", &[], config).await;

    assert!(report.pages.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("request_timeout_secs"));
}

#[tokio::test]
async fn test_unreachable_seed_yields_warned_page() {
    let seed = format!("http://127.0.0.1:{}/", closed_port());

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &seed)
        .await
        .expect("Seed is a valid URL");

    assert_eq!(outcome.pages.len(), 1);
    let page = &outcome.pages[0];
    assert_eq!(page.state, PageState::Warned);
    assert_eq!(page.word_count, 0);
    assert!(page.content_fingerprint.is_none());
    assert!(page.outbound_links.is_empty());
    assert!(!page.warnings.is_empty());
    assert!(page.warnings[0].starts_with("Returned "));
    assert!(outcome.fingerprint_index.is_empty());
}

#[tokio::test]
async fn test_unsupported_encoding_is_warned() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/report.pdf">Annual report</a></body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4 binary".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");

    let pdf = outcome
        .pages
        .iter()
        .find(|p| p.url.ends_with("/report.pdf"))
        .expect("PDF page missing");
    assert_eq!(pdf.state, PageState::Warned);
    assert_eq!(pdf.warnings, ["Can not read application/pdf"]);
    assert_eq!(pdf.word_count, 0);
    assert!(pdf.content_fingerprint.is_none());
}

#[tokio::test]
async fn test_error_status_is_still_analyzed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw("<html><body>Page not found</body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");

    let page = &outcome.pages[0];
    assert_eq!(page.status_code, Some(404));
    assert_eq!(page.warnings, ["HTTP 404"]);
    assert_eq!(page.word_count, 3);
    assert_eq!(page.state, PageState::Analyzed);
}

#[tokio::test]
async fn test_max_depth_limits_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", r#"<a href="/one">1</a>"#).await;
    mount_html(&mock_server, "/one", r#"<a href="/two">2</a>"#).await;
    mount_html(&mock_server, "/two", r#"<a href="/three">3</a>"#).await;

    let mut config = create_test_config();
    config.crawler.max_depth = Some(1);

    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");

    let mut urls: Vec<_> = outcome.pages.iter().map(|p| p.url.clone()).collect();
    urls.sort();
    assert_eq!(urls, [format!("{}/", base_url), format!("{}/one", base_url)]);
}

#[tokio::test]
async fn test_extra_seeds_reach_unlinked_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", "<p>nothing links out</p>").await;
    mount_html(&mock_server, "/orphan", "<p>orphan page</p>").await;

    let config = create_test_config();
    let coordinator = Coordinator::new(config.clone(), fetcher(&config), &base_url)
        .expect("Valid seed")
        .with_extra_seeds(&[
            format!("{}/orphan", base_url),
            "https://elsewhere.invalid/".to_string(),
        ]);

    let outcome = coordinator.run().await;

    assert_eq!(outcome.pages.len(), 2);
    assert!(outcome.pages.iter().any(|p| p.url.ends_with("/orphan")));
}

#[tokio::test]
async fn test_analyze_site_reports_json() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        "<html><head><title>Bakery</title></head><body>fresh bread daily</body></html>",
    )
    .await;

    let report = analyze_site(&base_url, &[], create_test_config()).await;
    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("Serializable")).expect("Valid JSON");

    assert_eq!(json["pages"][0]["url"], format!("{}/", base_url));
    assert_eq!(json["pages"][0]["title"], "bakery");
    assert_eq!(json["pages"][0]["word_count"], 3);
    assert_eq!(json["duplicate_pages"], serde_json::json!([]));
    assert_eq!(json["keywords"], serde_json::json!([]));
    assert_eq!(json["errors"], serde_json::json!([]));
    assert!(json["total_time"].as_f64().expect("Numeric time") >= 0.0);
}

#[tokio::test]
async fn test_analyze_site_invalid_seed() {
    let report = analyze_site("ftp://example.com/", &[], create_test_config()).await;

    assert!(report.pages.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("ftp"));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>late</p>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawler.request_timeout_secs = 1;

    let outcome = run_crawl(config.clone(), fetcher(&config), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 1);
    assert_eq!(outcome.pages[0].state, PageState::Warned);
    assert!(outcome.pages[0].warnings[0].contains("timed out"));
}
