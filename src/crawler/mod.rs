//! The date-driven archive crawler.
//!
//! The archive site publishes one listing page per calendar day. The
//! crawler turns an inclusive date range into a deduplicated table of
//! articles by walking those listing pages day by day:
//!
//! | Stage | Module | Concurrency |
//! |-------|--------|-------------|
//! | Date → archive serial | [`serial`] | pure |
//! | Archive page fetch + link extraction | [`archive`] | one GET per day |
//! | Article fetch + parse | [`article`] | batched, bounded |
//! | Day/range orchestration | [`range`] | sequential across days |
//!
//! The two concurrency layers are deliberately asymmetric: days run
//! strictly one after another to bound burst load on the site and keep
//! failure attribution simple, while the articles of a single day are
//! fetched as one concurrent batch over a shared client.
//!
//! [`ArchiveCrawler`] is the public face: it owns the HTTP client for
//! the duration of a run and exposes [`ArchiveCrawler::crawl_range`]
//! and [`ArchiveCrawler::crawl_day`].

pub mod archive;
pub mod article;
pub mod range;
pub mod serial;

use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::Result;
use crate::fetch::{BROWSER_USER_AGENT, HttpConfig, RetryPolicy, build_http_client};
use crate::models::{ArticleRecord, CrawlRange, NewsTable};

/// Origin of the production archive site.
pub const DEFAULT_BASE_URL: &str = "https://economictimes.indiatimes.com";

/// Tunables for one crawler instance.
///
/// The configuration is an explicit, caller-scoped value: build it,
/// hand it to [`ArchiveCrawler::new`], and the client session it
/// describes lives exactly as long as the crawler.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Origin that archive URLs are built on and candidate links are
    /// resolved against.
    pub base_url: Url,
    /// User agent sent on every request.
    pub user_agent: String,
    /// Maximum simultaneous in-flight article fetches within one day.
    pub max_concurrent_fetches: usize,
    /// Bound on the total wait for one request.
    pub request_timeout: Duration,
    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Backoff behavior for transient fetch failures.
    pub retry: RetryPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"),
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_concurrent_fetches: 10,
            request_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// A crawler bound to one archive site and one HTTP session.
///
/// The client is created once with fixed headers and timeouts and is
/// shared read-only across all concurrent fetches of a run, so
/// connections are reused and no shared mutable state exists between
/// article tasks.
#[derive(Debug)]
pub struct ArchiveCrawler {
    client: Client,
    config: CrawlerConfig,
}

impl ArchiveCrawler {
    /// Build a crawler and its HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let http = HttpConfig {
            user_agent: config.user_agent.clone(),
            request_timeout: config.request_timeout,
            connect_timeout: config.connect_timeout,
        };
        let client = build_http_client(&http)?;
        Ok(Self { client, config })
    }

    /// Crawl every day from `start` through `end`, both inclusive, and
    /// assemble the deduplicated, date-sorted result table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MinerError::InvalidRange`] if `start` is after
    /// `end`, before any network activity. Fetch failures never error:
    /// the affected day or article is skipped with a warning and the
    /// crawl continues.
    pub async fn crawl_range(&self, start: NaiveDate, end: NaiveDate) -> Result<NewsTable> {
        let range = CrawlRange::new(start, end)?;
        Ok(range::crawl_range(&self.client, &self.config, range).await)
    }

    /// Crawl a single archive day, returning its surviving records in
    /// batch completion order.
    pub async fn crawl_day(&self, date: NaiveDate) -> Vec<ArticleRecord> {
        range::crawl_day(&self.client, &self.config, date).await
    }

    /// The configuration this crawler was built with.
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }
}
