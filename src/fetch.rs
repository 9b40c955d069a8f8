//! HTTP page fetching with exponential backoff retry logic.
//!
//! This module owns the crate's single network boundary: building the
//! shared `reqwest` client and issuing GET requests through it. It
//! includes automatic retry logic with exponential backoff and jitter
//! for transient failures (timeouts, connection errors, 5xx responses).
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchAsync`]: core trait defining an async page fetch
//! - [`PageFetcher`]: issues GETs through a shared [`reqwest::Client`]
//! - [`RetryFetch`]: decorator that adds retry logic to any
//!   [`FetchAsync`] implementation
//!
//! # Retry Strategy
//!
//! - Transient failures only: timeouts, connection errors, 5xx
//! - 4xx responses are terminal and reported immediately
//! - Exponential backoff starting at 500ms, capped at 5 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use rand::{Rng, rng};
use reqwest::Client;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

use crate::{MinerError, Result};

/// Realistic desktop browser user agent. The archive site shapes its
/// response on the user agent, so the default mimics a mainstream
/// browser rather than announcing a crawler.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the shared HTTP client.
///
/// Headers and timeouts are fixed at client creation; the client is
/// shared read-only across all concurrent fetches of a run.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent header sent on every request.
    pub user_agent: String,
    /// Bound on the total wait for one request.
    pub request_timeout: StdDuration,
    /// Bound on establishing the TCP connection.
    pub connect_timeout: StdDuration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            request_timeout: StdDuration::from_secs(20),
            connect_timeout: StdDuration::from_secs(10),
        }
    }
}

/// Build the connection-reusing HTTP client for one crawler instance.
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .build()
}

/// Backoff parameters for retrying transient fetch failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first failure.
    pub max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    pub base_delay: StdDuration,
    /// Cap on the delay between retries.
    pub max_delay: StdDuration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: StdDuration::from_millis(500),
            max_delay: StdDuration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries. Failures are reported on the first
    /// attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Trait for async page fetching.
///
/// Implementors retrieve the resource behind a URL. The abstraction
/// exists so decorators like [`RetryFetch`] can wrap any fetcher.
pub trait FetchAsync {
    /// The type of response produced by a successful fetch.
    type Response;

    /// Retrieve the resource at `url`.
    async fn fetch(&self, url: &str) -> Result<Self::Response>;
}

/// Fetcher that issues one GET through a shared [`reqwest::Client`]
/// and returns the response body as text.
///
/// A non-2xx status is an error here; the caller decides whether that
/// skips a day, skips an article, or surfaces to the user.
#[derive(Debug)]
pub struct PageFetcher<'a> {
    /// The shared client carrying the fixed headers and timeouts.
    pub client: &'a Client,
}

impl<'a> FetchAsync for PageFetcher<'a> {
    type Response = String;

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| MinerError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u128,
                "GET returned non-success status"
            );
            return Err(MinerError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| MinerError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Whether a fetch failure is worth retrying.
///
/// Client errors (4xx) and non-network failures are terminal; the page
/// will not materialize by asking again.
fn is_retryable(e: &MinerError) -> bool {
    match e {
        MinerError::Status { status, .. } => *status >= 500,
        MinerError::Http { source, .. } => source.is_timeout() || source.is_connect(),
        _ => false,
    }
}

/// Wrapper that adds exponential backoff retry logic to any
/// [`FetchAsync`] implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    /// Wrap an existing fetcher with the given retry policy.
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync + fmt::Debug,
{
    type Response = T::Response;

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<Self::Response> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if !is_retryable(&e) {
                        return Err(e);
                    }

                    if attempt > self.policy.max_retries {
                        error!(
                            attempt,
                            max = self.policy.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.policy.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.policy.max_delay {
                        delay = self.policy.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.policy.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetch a page as text, retrying transient failures per `policy`.
///
/// This is the entry point the crawler uses for both archive-listing
/// pages and article pages.
pub async fn fetch_with_backoff(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String> {
    let fetcher = PageFetcher { client };
    let retrying = RetryFetch::new(fetcher, policy.clone());
    retrying.fetch(url).await
}
