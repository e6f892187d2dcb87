//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small sites and check the crawl order,
//! the page cap and the same-site restriction end-to-end.

use crate::common::{mount_page, mount_page_expecting, test_fetcher};
use metaharvest::crawler::Crawler;
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_is_breadth_first_and_capped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><p>Home</p>
            <a href="/a">A</a>
            <a href="/b">B</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<html><body><p>Page A</p><a href="/c">C</a><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/b", "<html><body><p>Page B</p></body></html>").await;
    // The cap is reached before /c comes off the queue
    mount_page_expecting(&mock_server, "/c", "<p>Page C</p>", 0).await;

    let crawler = Crawler::new(test_fetcher());
    let pages = crawler.crawl(&format!("{}/", base_url), 3).await;

    let urls: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
        ]
    );
    assert_eq!(pages[1].text, "Page A C Home");
}

#[tokio::test]
async fn test_crawl_stays_on_seed_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();

    // Same server reached through a different host name must not be followed
    let other_host = format!("http://localhost:{}/elsewhere", port);
    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="{}">Elsewhere</a><a href="https://example.com/x">External</a>
               <a href="/local">Local</a>"#,
            other_host
        ),
    )
    .await;
    mount_page(&mock_server, "/local", "<p>Local page</p>").await;
    mount_page_expecting(&mock_server, "/elsewhere", "<p>Elsewhere</p>", 0).await;

    let crawler = Crawler::new(test_fetcher());
    let pages = crawler.crawl(&format!("{}/", base_url), 10).await;

    let seed_host = url::Url::parse(&base_url).unwrap();
    for page in &pages {
        let page_url = url::Url::parse(&page.url).unwrap();
        assert_eq!(page_url.host_str(), seed_host.host_str());
        assert_eq!(page_url.port(), seed_host.port());
    }
    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_crawl_never_fetches_a_page_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let cyclic = r##"<p>Node</p>
        <a href="/">Home</a>
        <a href="/one">One</a>
        <a href="/one#details">One again</a>
        <a href="/two">Two</a>"##;
    mount_page_expecting(&mock_server, "/", cyclic, 1).await;
    mount_page_expecting(&mock_server, "/one", cyclic, 1).await;
    mount_page_expecting(&mock_server, "/two", cyclic, 1).await;

    let crawler = Crawler::new(test_fetcher());
    let pages = crawler.crawl(&format!("{}/", base_url), 10).await;

    let unique: HashSet<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(pages.len(), 3);
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn test_error_pages_are_skipped_but_their_links_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<p>Start</p><a href="/missing">Missing</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<p>Not found</p><a href="/recovered">Try this</a>"#),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/recovered", "<p>Recovered</p>").await;

    let crawler = Crawler::new(test_fetcher());
    let pages = crawler.crawl(&format!("{}/", base_url), 5).await;

    let urls: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![format!("{}/", base_url), format!("{}/recovered", base_url)]
    );
}

#[tokio::test]
async fn test_unreachable_seed_yields_no_pages() {
    let crawler = Crawler::new(test_fetcher());
    assert!(crawler.crawl("http://127.0.0.1:9/", 3).await.is_empty());
}
