//! Integration tests for the archive crawler.
//!
//! These tests use wiremock to stand in for the archive site and test
//! the full crawl cycle end-to-end: admission policy, per-day failure
//! isolation, cross-day deduplication, and request accounting.

use chrono::{Datelike, NaiveDate};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsminer::MinerError;
use newsminer::crawler::serial::archive_serial;
use newsminer::crawler::{ArchiveCrawler, CrawlerConfig};
use newsminer::fetch::RetryPolicy;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Path of the archive-listing page the crawler is expected to request
/// for `date`.
fn archive_path(date: NaiveDate) -> String {
    format!(
        "/archivelist/year-{},month-{},starttime-{}.cms",
        date.year(),
        date.month(),
        archive_serial(date)
    )
}

/// A crawler pointed at the mock server, with retries disabled so
/// request counts stay exact.
fn test_crawler(base: &str) -> ArchiveCrawler {
    let config = CrawlerConfig {
        base_url: Url::parse(base).expect("mock server URL parses"),
        max_concurrent_fetches: 5,
        retry: RetryPolicy::none(),
        ..CrawlerConfig::default()
    };
    ArchiveCrawler::new(config).expect("crawler builds")
}

fn article_html(title: &str, body: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="artTitle">{title}</h1>
        <div class="artSyn"><p>Synopsis.</p></div>
        <div class="artText"><p>{body}</p></div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, page_path: &str, html: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_day_admission_and_request_counts() {
    let mock_server = MockServer::start().await;
    let date = day(2025, 1, 1);

    // Five candidate links, two of them live pages. Only the three
    // real articles may be fetched.
    let archive_html = r#"<html><body>
        <a href="/markets/stocks/news/articleshow/1001.cms">Markets story</a>
        <a href="/industry/banking/articleshow/1002.cms">Industry story</a>
        <a href="tech/software/articleshow/1003.cms">Tech story (relative)</a>
        <a href="/markets/liveblog/articleshow/1004.cms">Live coverage</a>
        <a href="/industry/LiveBlog/articleshow/1005.cms">Live, mixed case</a>
        </body></html>"#;

    mount_html(&mock_server, &archive_path(date), archive_html.to_string(), 1).await;
    mount_html(
        &mock_server,
        "/markets/stocks/news/articleshow/1001.cms",
        article_html("Markets story", "Body one."),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/industry/banking/articleshow/1002.cms",
        article_html("Industry story", "Body two."),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/tech/software/articleshow/1003.cms",
        article_html("Tech story", "Body three."),
        1,
    )
    .await;
    // Live pages must never be requested.
    mount_html(
        &mock_server,
        "/markets/liveblog/articleshow/1004.cms",
        article_html("Live coverage", "Rolling."),
        0,
    )
    .await;
    mount_html(
        &mock_server,
        "/industry/LiveBlog/articleshow/1005.cms",
        article_html("Live coverage 2", "Rolling."),
        0,
    )
    .await;

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(date, date).await.unwrap();

    assert_eq!(table.len(), 3);
    for record in table.iter() {
        assert_eq!(record.published_date, date);
        assert!(!record.body.is_empty());
    }
    let mut ids: Vec<_> = table
        .iter()
        .map(|r| r.article_id.clone().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["1001", "1002", "1003"]);
}

#[tokio::test]
async fn test_invalid_range_makes_no_requests() {
    let mock_server = MockServer::start().await;

    // Any request at all is a failure; the crawler only ever issues GETs.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&mock_server.uri());
    let err = crawler
        .crawl_range(day(2025, 1, 2), day(2025, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, MinerError::InvalidRange { .. }));
}

#[tokio::test]
async fn test_failed_day_is_isolated() {
    let mock_server = MockServer::start().await;
    let bad_day = day(2025, 1, 1);
    let good_day = day(2025, 1, 2);

    Mock::given(method("GET"))
        .and(path(archive_path(bad_day)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let archive_html = r#"<a href="/markets/stocks/articleshow/2001.cms">Story</a>"#;
    mount_html(&mock_server, &archive_path(good_day), archive_html.to_string(), 1).await;
    mount_html(
        &mock_server,
        "/markets/stocks/articleshow/2001.cms",
        article_html("Surviving story", "Body."),
        1,
    )
    .await;

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(bad_day, good_day).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].published_date, good_day);
    assert_eq!(table.records()[0].headline, "Surviving story");
}

#[tokio::test]
async fn test_failed_article_is_isolated_within_day() {
    let mock_server = MockServer::start().await;
    let date = day(2025, 1, 1);

    let archive_html = r#"<html><body>
        <a href="/markets/stocks/articleshow/3001.cms">Good</a>
        <a href="/markets/stocks/articleshow/3002.cms">Gone</a>
        </body></html>"#;
    mount_html(&mock_server, &archive_path(date), archive_html.to_string(), 1).await;
    mount_html(
        &mock_server,
        "/markets/stocks/articleshow/3001.cms",
        article_html("Good story", "Body."),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/markets/stocks/articleshow/3002.cms"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(date, date).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].headline, "Good story");
}

#[tokio::test]
async fn test_duplicate_across_days_earliest_wins() {
    let mock_server = MockServer::start().await;
    let first_day = day(2025, 1, 1);
    let second_day = day(2025, 1, 2);

    // Both archive pages advertise the same article.
    let archive_html = r#"<a href="/news/economy/articleshow/4001.cms">Repeat</a>"#;
    mount_html(&mock_server, &archive_path(first_day), archive_html.to_string(), 1).await;
    mount_html(&mock_server, &archive_path(second_day), archive_html.to_string(), 1).await;
    // The article is fetched under both days; dedup happens at range
    // assembly, not at fetch time.
    mount_html(
        &mock_server,
        "/news/economy/articleshow/4001.cms",
        article_html("Repeated story", "Body."),
        2,
    )
    .await;

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(first_day, second_day).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].published_date, first_day);
}

#[tokio::test]
async fn test_single_day_crawl_is_idempotent() {
    let mock_server = MockServer::start().await;
    let date = day(2025, 1, 1);

    let archive_html = r#"<html><body>
        <a href="/markets/stocks/articleshow/5001.cms">One</a>
        <a href="/industry/auto/articleshow/5002.cms">Two</a>
        </body></html>"#;
    mount_html(&mock_server, &archive_path(date), archive_html.to_string(), 2).await;
    mount_html(
        &mock_server,
        "/markets/stocks/articleshow/5001.cms",
        article_html("Story one", "Body one."),
        2,
    )
    .await;
    mount_html(
        &mock_server,
        "/industry/auto/articleshow/5002.cms",
        article_html("Story two", "Body two."),
        2,
    )
    .await;

    let crawler = test_crawler(&mock_server.uri());
    let first = crawler.crawl_range(date, date).await.unwrap();
    let second = crawler.crawl_range(date, date).await.unwrap();

    // Concurrent completion order may differ between runs, but the
    // assembled tables must not.
    let mut first_records = first.into_records();
    let mut second_records = second.into_records();
    first_records.sort_by(|a, b| a.link.cmp(&b.link));
    second_records.sort_by(|a, b| a.link.cmp(&b.link));
    assert_eq!(first_records, second_records);
    assert_eq!(first_records.len(), 2);
}

#[tokio::test]
async fn test_range_is_sorted_and_unique() {
    let mock_server = MockServer::start().await;
    let days = [day(2025, 1, 1), day(2025, 1, 2), day(2025, 1, 3)];

    for (i, date) in days.iter().enumerate() {
        let id = 6001 + i;
        let archive_html =
            format!(r#"<a href="/markets/stocks/articleshow/{id}.cms">Story {i}</a>"#);
        mount_html(&mock_server, &archive_path(*date), archive_html, 1).await;
        mount_html(
            &mock_server,
            &format!("/markets/stocks/articleshow/{id}.cms"),
            article_html(&format!("Story {i}"), "Body."),
            1,
        )
        .await;
    }

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(days[0], days[2]).await.unwrap();

    assert_eq!(table.len(), 3);
    // Non-decreasing by date.
    let dates: Vec<_> = table.iter().map(|r| r.published_date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    // No two records share (headline, link).
    let mut keys: Vec<_> = table.iter().map(|r| r.dedup_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 3);
}

#[tokio::test]
async fn test_empty_archive_page_yields_empty_table() {
    let mock_server = MockServer::start().await;
    let date = day(2025, 1, 1);

    mount_html(
        &mock_server,
        &archive_path(date),
        "<html><body><p>Nothing today.</p></body></html>".to_string(),
        1,
    )
    .await;

    let crawler = test_crawler(&mock_server.uri());
    let table = crawler.crawl_range(date, date).await.unwrap();
    assert!(table.is_empty());
}
