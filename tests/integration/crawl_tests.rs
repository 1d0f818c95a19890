//! Integration tests for the crawler and the article fetcher
//!
//! These tests use wiremock to create mock HTTP servers and test
//! discovery and fetching end-to-end. The HTTP client is blocking, so each
//! test drives it from `spawn_blocking` while the mock server runs on the
//! async runtime.

use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use treebank_harvest::article::{ArticleFetcher, AUTHOR_NOT_FOUND, BODY_PLACEHOLDER};
use treebank_harvest::config::{validate, CrawlConfig};
use treebank_harvest::crawler::{harvest, Crawler, HttpFetcher};
use treebank_harvest::storage::{ArtifactKind, FileStorage, Storage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_BODY: &str = "Жители Саранска отметили открытие нового моста через реку Инсар.";

/// Creates a validated test configuration
fn create_test_config(seeds: Vec<String>, total: usize) -> CrawlConfig {
    validate(&json!({
        "seed_urls": seeds,
        "headers": {"User-Agent": "TestBot/1.0"},
        "total_articles_to_find_and_parse": total,
        "encoding": "utf-8",
        "timeout": 5,
        "should_verify_certificate": true,
        "headless_mode": false
    }))
    .expect("test config must be valid")
}

/// Runs blocking crawler code off the async runtime
async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

fn find_articles(config: CrawlConfig) -> Vec<String> {
    Crawler::new(&config)
        .expect("Failed to build crawler")
        .with_delay(Duration::ZERO)
        .find_articles()
}

fn listing_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<dd class="title"><a href="{}">Новость</a></dd>"#, href))
        .collect();
    format!("<html><body><dl>{}</dl><a href=\"/about.html\">О нас</a></body></html>", links)
}

fn article_page(title: &str) -> String {
    format!(
        r#"<html><head><title>Новости Мордовии</title></head><body>
        <h1 class="title">{}</h1>
        <span class="date">12.03.2024 14:30</span>
        <div class="tags"><a href="/t/city">Город</a></div>
        <div class="article-text"><p>{}</p></div>
        </body></html>"#,
        title, ARTICLE_BODY
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_short_result_is_padded_with_last_url() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/news/", listing_page(&["/news-1-10.html", "/news-1-11.html"])).await;

    let config = create_test_config(vec![format!("{}/news/", base)], 5);
    let urls = run_blocking(move || find_articles(config)).await;

    let last = format!("{}/news-1-11.html", base);
    assert_eq!(urls.len(), 5);
    assert_eq!(urls[0], format!("{}/news-1-10.html", base));
    assert!(urls[1..].iter().all(|url| *url == last));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stops_at_target_mid_seed() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/news/",
        listing_page(&["/news-1-1.html", "/news-1-2.html", "/news-1-3.html"]),
    )
    .await;

    // The second seed must never be requested
    Mock::given(method("GET"))
        .and(path("/more/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(vec![format!("{}/news/", base), format!("{}/more/", base)], 2);
    let urls = run_blocking(move || find_articles(config)).await;

    assert_eq!(
        urls,
        vec![format!("{}/news-1-1.html", base), format!("{}/news-1-2.html", base)]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_links_yields_empty_result() {
    let server = MockServer::start().await;
    mount_page(&server, "/news/", listing_page(&[])).await;

    let config = create_test_config(vec![format!("{}/news/", server.uri())], 3);
    let urls = run_blocking(move || find_articles(config)).await;

    assert!(urls.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failing_seed_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/broken/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/news/", listing_page(&["/news-2-20.html"])).await;

    let config = create_test_config(vec![format!("{}/broken/", base), format!("{}/news/", base)], 1);
    let urls = run_blocking(move || find_articles(config)).await;

    assert_eq!(urls, vec![format!("{}/news-2-20.html", base)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicates_across_seeds_are_dropped() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/a/", listing_page(&["/news-1-1.html", "/news-1-1.html#comments"])).await;
    mount_page(&server, "/b/", listing_page(&["/news-1-1.html", "/news-1-2.html"])).await;

    let config = create_test_config(vec![format!("{}/a/", base), format!("{}/b/", base)], 2);
    let urls = run_blocking(move || find_articles(config)).await;

    assert_eq!(
        urls,
        vec![format!("{}/news-1-1.html", base), format!("{}/news-1-2.html", base)]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_writes_raw_and_meta() {
    let server = MockServer::start().await;
    mount_page(&server, "/news-1-7.html", article_page("Открыт новый мост")).await;

    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let url = format!("{}/news-1-7.html", server.uri());
    let config = create_test_config(vec![format!("{}/news/", server.uri())], 1);

    let article = run_blocking(move || {
        let fetcher = HttpFetcher::new(&config).unwrap().with_delay(Duration::ZERO);
        let storage = FileStorage::new(root);
        ArticleFetcher::new(&fetcher, &storage).parse(&url, 1).unwrap()
    })
    .await
    .expect("article should be fetched");

    assert_eq!(article.id, 1);
    assert_eq!(article.title, "Открыт новый мост");
    assert_eq!(article.text, ARTICLE_BODY);
    assert_eq!(article.authors, vec![AUTHOR_NOT_FOUND]);
    assert_eq!(article.topics, vec!["Город"]);

    let storage = FileStorage::new(temp.path());
    assert_eq!(storage.load_raw(1).unwrap(), ARTICLE_BODY);
    let meta = storage.load_meta(1).unwrap();
    assert_eq!(meta.title, "Открыт новый мост");
    assert_eq!(meta.date.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-12 14:30:00");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_short_body_is_replaced() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/news-1-8.html",
        r#"<html><body><div class="content"><p>Кратко.</p></div></body></html>"#.to_string(),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let url = format!("{}/news-1-8.html", server.uri());
    let config = create_test_config(vec![format!("{}/news/", server.uri())], 1);

    let article = run_blocking(move || {
        let fetcher = HttpFetcher::new(&config).unwrap().with_delay(Duration::ZERO);
        let storage = FileStorage::new(root);
        ArticleFetcher::new(&fetcher, &storage).parse(&url, 3).unwrap()
    })
    .await
    .expect("article should be fetched");

    assert_eq!(article.text, BODY_PLACEHOLDER);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_article_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let config = create_test_config(vec!["https://mordovia-news.ru/news/".to_string()], 1);

    let result = run_blocking(move || {
        let fetcher = HttpFetcher::new(&config).unwrap().with_delay(Duration::ZERO);
        let storage = FileStorage::new(root);
        ArticleFetcher::new(&fetcher, &storage)
            .parse("http://127.0.0.1:9/news-1-1.html", 1)
            .unwrap()
    })
    .await;

    assert!(result.is_none());
    let storage = FileStorage::new(temp.path());
    assert!(!storage.has_artifact(1, ArtifactKind::Raw));
    assert!(!storage.has_artifact(1, ArtifactKind::Meta));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_harvest_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/news/", listing_page(&["/news-1-1.html", "/news-1-2.html"])).await;
    mount_page(&server, "/news-1-1.html", article_page("Первая")).await;
    Mock::given(method("GET"))
        .and(path("/news-1-2.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("articles");
    let config = create_test_config(vec![format!("{}/news/", base)], 2);

    let stats = {
        let root = root.clone();
        run_blocking(move || {
            let storage = FileStorage::prepare(root).unwrap();
            harvest(&config, &storage, Duration::ZERO).unwrap()
        })
        .await
    };

    assert_eq!(stats.urls_collected, 2);
    assert_eq!(stats.articles_saved, 1);
    assert_eq!(stats.fetch_failures, 1);

    let storage = FileStorage::new(&root);
    assert!(storage.has_artifact(1, ArtifactKind::Raw));
    assert!(storage.has_artifact(1, ArtifactKind::Meta));
    assert!(!storage.has_artifact(2, ArtifactKind::Raw));
    assert!(!storage.has_artifact(2, ArtifactKind::Meta));
}
