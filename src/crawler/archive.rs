//! Archive page retrieval and candidate-link extraction.
//!
//! One archive-listing page exists per calendar day, addressed by
//! year, month, and the day's spreadsheet-epoch serial:
//!
//! ```text
//! {base}/archivelist/year-2025,month-1,starttime-45658.cms
//! ```
//!
//! The page links out to everything published that day, including
//! plenty that is not an article: section fronts, slideshows, live
//! coverage. [`extract_article_links`] is the single admission policy
//! deciding which anchors count as article candidates.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, instrument};
use url::Url;

use crate::Result;
use crate::crawler::serial::archive_serial;
use crate::fetch::{RetryPolicy, fetch_with_backoff};

/// Section path fragments admitted as article sections.
const SECTION_PATHS: &[&str] = &[
    "/news/company",
    "/news/economy",
    "/markets",
    "/industry",
    "/tech",
];

/// Marker carried by rolling live-coverage pages, which are not
/// articles. Matched case-insensitively.
const LIVE_MARKER: &str = "liveblog";

/// Article permalink pattern, capturing the numeric article id. The
/// `amp_` variant appears on accelerated-mobile links.
pub(crate) static ARTICLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:amp_)?articleshow/(\d+)\.cms").unwrap());

/// Build the archive-listing URL for one calendar day.
pub fn archive_url(base: &Url, date: NaiveDate) -> Result<Url> {
    let path = format!(
        "archivelist/year-{},month-{},starttime-{}.cms",
        date.year(),
        date.month(),
        archive_serial(date)
    );
    Ok(base.join(&path)?)
}

/// Fetch the raw HTML of one day's archive page.
///
/// # Errors
///
/// Returns a fetch error after retries are exhausted; the day crawler
/// absorbs it by skipping the day.
#[instrument(level = "info", skip(client, base, retry))]
pub async fn fetch_archive_page(
    client: &Client,
    base: &Url,
    date: NaiveDate,
    retry: &RetryPolicy,
) -> Result<String> {
    let url = archive_url(base, date)?;
    let html = fetch_with_backoff(client, url.as_str(), retry).await?;
    debug!(bytes = html.len(), %url, "Fetched archive page");
    Ok(html)
}

/// Extract candidate article URLs from archive-page HTML.
///
/// Every `a[href]` anchor is considered; hrefs are whitespace-trimmed
/// and resolved against `base`, so relative and absolute links come
/// out the same. Admission is decided by [`is_article_link`]. The
/// result preserves first-seen order and contains no duplicates.
pub fn extract_article_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href.trim()) else {
            continue;
        };
        if !is_article_link(&resolved) {
            continue;
        }
        let link = resolved.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }
    links
}

/// The admission policy for candidate links.
///
/// A URL counts as an article when all three hold:
/// - its path contains one of the allowed section fragments
/// - its path matches the article permalink pattern
///   (`articleshow/<id>.cms`, optionally `amp_`-prefixed)
/// - it does not carry the live-coverage marker (any casing)
pub fn is_article_link(url: &Url) -> bool {
    let path = url.path();
    let in_section = SECTION_PATHS.iter().any(|section| path.contains(section));
    let is_permalink = ARTICLE_ID_RE.is_match(path);
    let is_live = url.as_str().to_ascii_lowercase().contains(LIVE_MARKER);
    in_section && is_permalink && !is_live
}
