//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against an on-disk database.

use pin_harvest::config::{Config, CrawlerConfig, OutputConfig};
use pin_harvest::crawler::crawl;
use pin_harvest::storage::{open_storage, SqliteStorage, Storage, Table};
use pin_harvest::HarvestError;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIE_FILE: &str = "# Netscape HTTP Cookie File\n\n";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &TempDir, max_depth: u32) -> Config {
    let cookies_path = dir.path().join("cookies.txt");
    std::fs::write(&cookies_path, COOKIE_FILE).expect("Failed to write cookie file");

    Config {
        crawler: CrawlerConfig {
            requests_per_second: 1000.0,
            max_depth,
            request_timeout_secs: 5,
            base_url: base_url.to_string(),
            user_agent: "TestHarvester/1.0".to_string(),
        },
        output: OutputConfig {
            database_path: db_path(dir).display().to_string(),
            cookies_path: cookies_path.display().to_string(),
        },
    }
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("pins.db")
}

fn open_db(dir: &TempDir) -> SqliteStorage {
    open_storage(&db_path(dir)).expect("Failed to open database")
}

/// Builds a pin page with an optional image and links to other pins
fn pin_page(asset: Option<&str>, recommendations: &[&str]) -> String {
    let meta = asset
        .map(|a| format!(r#"<meta property="og:image" content="{}">"#, a))
        .unwrap_or_default();
    let links: String = recommendations
        .iter()
        .map(|r| format!(r#"<a href="{}">more</a>"#, r))
        .collect();

    format!(
        "<html><head>{}</head><body><div class=\"closeup\"></div>{}</body></html>",
        meta, links
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pin_crawl_respects_depth_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/pin/123/",
        pin_page(Some("https://img.test/x.jpg"), &["/pin/201/", "/pin/202/"]),
        1,
    )
    .await;
    // Processed at level 1: its recommendation is not followed
    mount_page(&mock_server, "/pin/201/", pin_page(None, &["/pin/301/"]), 1).await;
    mount_page(&mock_server, "/pin/202/", pin_page(None, &[]), 0).await;

    let config = create_test_config(&base_url, &dir, 1);
    let report = crawl(&config, &format!("{}/pin/123/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pins_processed, 2);
    assert_eq!(report.assets_recorded, 1);

    let storage = open_db(&dir);
    let images = storage.list_images().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].url, "https://img.test/x.jpg");
    assert_eq!(
        images[0].source_url.as_deref(),
        Some(format!("{}/pin/123/", base_url).as_str())
    );

    let pin = |id: u32| format!("{}/pin/{}/", base_url, id);
    assert!(storage.get_pin(&pin(123)).unwrap().unwrap().scanned);
    assert!(storage.get_pin(&pin(201)).unwrap().unwrap().scanned);
    assert!(!storage.get_pin(&pin(202)).unwrap().unwrap().scanned);
    assert!(!storage.seen(Table::Pin, &pin(301)).unwrap());
}

#[tokio::test]
async fn test_seed_fetch_failure_completes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/pin/123/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir, 1);
    let report = crawl(&config, &format!("{}/pin/123/", base_url))
        .await
        .expect("Fetch failures should not fail the crawl");

    assert_eq!(report.pins_failed, 1);
    assert_eq!(report.pins_processed, 0);

    let storage = open_db(&dir);
    let seed = storage
        .get_pin(&format!("{}/pin/123/", base_url))
        .unwrap()
        .expect("Seed pin should be stored");
    assert!(seed.scanned);
    assert_eq!(storage.count_images().unwrap(), 0);
}

#[tokio::test]
async fn test_board_crawl_collects_every_pin() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    let board = r#"
        <html><body>
            <header><a href="/pin/999/">Promoted</a></header>
            <div data-test-id="pin"><a href="/pin/1/">One</a></div>
            <div data-test-id="pin"><a href="/pin/2/">Two</a></div>
            <div data-test-id="pin"><a href="/pin/1/">One again</a></div>
            <div data-test-id="pin"><a href="/pin/3/">Three</a></div>
            <div data-test-id="pin"><a href="/pin/oops/">Broken</a></div>
        </body></html>
    "#;
    mount_page(&mock_server, "/alice/cakes/", board.to_string(), 1).await;
    for id in 1..=3 {
        mount_page(
            &mock_server,
            &format!("/pin/{}/", id),
            pin_page(Some(&format!("https://img.test/{}.jpg", id)), &[]),
            1,
        )
        .await;
    }
    mount_page(&mock_server, "/pin/999/", pin_page(None, &[]), 0).await;

    let config = create_test_config(&base_url, &dir, 10);
    let report = crawl(&config, &format!("{}/alice/cakes/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pins_enqueued, 3);
    assert_eq!(report.pins_processed, 3);
    assert_eq!(report.assets_recorded, 3);

    let storage = open_db(&dir);
    assert_eq!(storage.count_pins().unwrap(), 3);
    assert_eq!(storage.count_pins_by_scanned(false).unwrap(), 0);

    let images: Vec<String> = storage
        .list_images()
        .unwrap()
        .into_iter()
        .map(|image| image.url)
        .collect();
    assert_eq!(
        images,
        vec![
            "https://img.test/1.jpg",
            "https://img.test/2.jpg",
            "https://img.test/3.jpg",
        ]
    );
}

#[tokio::test]
async fn test_resume_skips_scanned_pins() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    // Each page is fetched exactly once across both runs
    mount_page(
        &mock_server,
        "/pin/123/",
        pin_page(Some("https://img.test/x.jpg"), &["/pin/201/", "/pin/202/"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/pin/201/", pin_page(None, &[]), 1).await;
    mount_page(
        &mock_server,
        "/pin/202/",
        pin_page(Some("https://img.test/y.jpg"), &[]),
        1,
    )
    .await;

    let config = create_test_config(&base_url, &dir, 1);
    let start = format!("{}/pin/123/", base_url);

    let first = crawl(&config, &start).await.expect("First run failed");
    assert_eq!(first.pins_processed, 2);
    assert_eq!(open_db(&dir).count_pins_by_scanned(false).unwrap(), 1);

    let second = crawl(&config, &start).await.expect("Second run failed");
    assert_eq!(second.pins_processed, 1);
    assert_eq!(second.pins_enqueued, 0);

    let storage = open_db(&dir);
    assert_eq!(storage.count_pins_by_scanned(false).unwrap(), 0);
    assert!(storage.seen(Table::Image, "https://img.test/y.jpg").unwrap());
    assert_eq!(storage.count_images().unwrap(), 2);
}

#[tokio::test]
async fn test_depth_zero_does_not_enqueue_recommendations() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/pin/123/",
        pin_page(Some("https://img.test/x.jpg"), &["/pin/201/"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/pin/201/", pin_page(None, &[]), 0).await;

    let config = create_test_config(&base_url, &dir, 0);
    crawl(&config, &format!("{}/pin/123/", base_url))
        .await
        .expect("Crawl failed");

    let storage = open_db(&dir);
    assert_eq!(storage.count_pins().unwrap(), 1);
    assert_eq!(storage.count_images().unwrap(), 1);
}

#[tokio::test]
async fn test_unsupported_start_url_does_not_create_database() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    let config = create_test_config(&base_url, &dir, 1);
    let result = crawl(&config, &format!("{}/", base_url)).await;

    assert!(matches!(
        result,
        Err(HarvestError::UnsupportedStartReference { .. })
    ));
    assert!(!db_path(&dir).exists());
}

#[tokio::test]
async fn test_malformed_cookie_file_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    let config = create_test_config(&base_url, &dir, 1);
    std::fs::write(
        &config.output.cookies_path,
        "# Netscape HTTP Cookie File\n.site.test\tTRUE\t/\tFALSE\n",
    )
    .unwrap();

    let result = crawl(&config, &format!("{}/pin/1/", base_url)).await;

    assert!(matches!(
        result,
        Err(HarvestError::Cookie(pin_harvest::CookieError::MalformedLine {
            line_number: 2,
            ..
        }))
    ));
    assert!(!db_path(&dir).exists());
}

#[tokio::test]
async fn test_cyclic_pins_are_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    // Links with and without the trailing slash name the same pin
    mount_page(
        &mock_server,
        "/pin/1/",
        pin_page(Some("https://img.test/1.jpg"), &["/pin/2"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/pin/2/",
        pin_page(Some("https://img.test/2.jpg"), &["/pin/1/", "/pin/1", "/pin/2/"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/pin/1", pin_page(None, &[]), 0).await;
    mount_page(&mock_server, "/pin/2", pin_page(None, &[]), 0).await;

    let config = create_test_config(&base_url, &dir, 50);
    let report = crawl(&config, &format!("{}/pin/1", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pins_processed, 2);
    assert_eq!(report.pins_enqueued, 2);
    assert_eq!(report.assets_recorded, 2);

    let storage = open_db(&dir);
    assert_eq!(storage.count_pins().unwrap(), 2);
    assert_eq!(storage.count_pins_by_scanned(false).unwrap(), 0);
}

#[tokio::test]
async fn test_failed_pin_is_not_refetched_on_resume() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/pin/123/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir, 1);
    let start = format!("{}/pin/123/", base_url);

    let first = crawl(&config, &start).await.expect("First run failed");
    assert_eq!(first.pins_failed, 1);

    let second = crawl(&config, &start).await.expect("Second run failed");
    assert_eq!(
        second,
        pin_harvest::CrawlReport {
            pins_processed: 0,
            pins_failed: 0,
            assets_recorded: 0,
            pins_enqueued: 0,
        }
    );

    let storage = open_db(&dir);
    assert!(storage.get_pin(&start).unwrap().unwrap().scanned);
    assert_eq!(storage.count_images().unwrap(), 0);
}
