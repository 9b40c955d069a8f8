//! Day-level and range-level crawl orchestration.
//!
//! [`crawl_day`] handles one archive day: fetch the listing page,
//! extract candidates, fetch all of them as one bounded concurrent
//! batch. [`crawl_range`] walks the days strictly sequentially and
//! assembles the final table. A failed day contributes nothing and
//! stops nothing.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::crawler::CrawlerConfig;
use crate::crawler::archive::{extract_article_links, fetch_archive_page};
use crate::crawler::article::fetch_article;
use crate::models::{ArticleRecord, CrawlRange, NewsTable};

/// Crawl one archive day.
///
/// All candidate fetches are dispatched together and awaited as a
/// batch with at most `max_concurrent_fetches` in flight; completion
/// order within the batch is unconstrained. Failed or dropped
/// candidates simply vanish from the result. An unreachable archive
/// page yields an empty day.
#[instrument(level = "info", skip(client, config))]
pub async fn crawl_day(client: &Client, config: &CrawlerConfig, date: NaiveDate) -> Vec<ArticleRecord> {
    let html = match fetch_archive_page(client, &config.base_url, date, &config.retry).await {
        Ok(html) => html,
        Err(e) => {
            warn!(%date, error = %e, "Archive page fetch failed; skipping day");
            return Vec::new();
        }
    };

    let links = extract_article_links(&html, &config.base_url);
    info!(%date, candidates = links.len(), "Extracted candidate article links");

    let records: Vec<ArticleRecord> = stream::iter(links)
        .map(|link| {
            let retry = &config.retry;
            async move { fetch_article(client, &link, date, retry).await }
        })
        .buffer_unordered(config.max_concurrent_fetches)
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(%date, fetched = records.len(), "Completed day batch");
    records
}

/// Crawl a validated date range into the final result table.
///
/// Days run strictly sequentially: one day's batch fully completes
/// (or fails) before the next archive page is requested. After the
/// last day, the accumulated records are deduplicated on
/// `(headline, link)` with the earliest occurrence winning and sorted
/// ascending by archive day.
#[instrument(level = "info", skip(client, config), fields(start = %range.start(), end = %range.end()))]
pub async fn crawl_range(client: &Client, config: &CrawlerConfig, range: CrawlRange) -> NewsTable {
    let mut discovered: Vec<ArticleRecord> = Vec::new();
    for date in range.days() {
        let batch = crawl_day(client, config, date).await;
        discovered.extend(batch);
    }

    let table = NewsTable::from_records(discovered);
    info!(
        days = range.num_days(),
        records = table.len(),
        "Crawl complete"
    );
    table
}
