//! Article page retrieval and field extraction.
//!
//! Candidate links admitted by the archive stage are fetched one page
//! at a time (concurrently, from the day crawler's batch) and parsed
//! into [`ArticleRecord`]s. Failures here never propagate: an
//! unreachable page or a page without a recognizable headline yields
//! `None` and a warning, and the rest of the batch carries on.

use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::crawler::archive::ARTICLE_ID_RE;
use crate::fetch::{RetryPolicy, fetch_with_backoff};
use crate::models::ArticleRecord;

/// Parse the numeric article id out of a permalink URL.
///
/// Supports the `amp_articleshow` variant. Returns `None` for URL
/// shapes the pattern does not recognize; the record is still kept in
/// that case, just without an id.
pub fn parse_article_id(url: &str) -> Option<String> {
    ARTICLE_ID_RE
        .captures(url)
        .map(|captures| captures[1].to_string())
}

/// Fetch one article page and extract its fields.
///
/// `published_date` is the archive day the link was discovered under;
/// it is recorded as-is and never replaced by a value scraped from the
/// page, since the archive's day-bucket is the ground truth for
/// ordering.
///
/// Returns `None` on fetch failure or when the page has no headline.
#[instrument(level = "debug", skip(client, retry), fields(%url, %published_date))]
pub async fn fetch_article(
    client: &Client,
    url: &str,
    published_date: NaiveDate,
    retry: &RetryPolicy,
) -> Option<ArticleRecord> {
    let html = match fetch_with_backoff(client, url, retry).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Article fetch failed; skipping");
            return None;
        }
    };
    parse_article(&html, url, published_date)
}

/// Extract headline, body, and id from article-page HTML.
fn parse_article(html: &str, url: &str, published_date: NaiveDate) -> Option<ArticleRecord> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("h1.artTitle").unwrap();
    let fallback_title_selector = Selector::parse("h1").unwrap();
    let synopsis_selector = Selector::parse("div.artSyn").unwrap();
    let body_selector = Selector::parse("div.artText").unwrap();

    let headline = document
        .select(&title_selector)
        .next()
        .or_else(|| document.select(&fallback_title_selector).next())
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
        .filter(|headline| !headline.is_empty());

    let Some(headline) = headline else {
        warn!(%url, "Article page has no headline; dropping");
        return None;
    };

    let mut body = String::new();
    for element in document
        .select(&synopsis_selector)
        .chain(document.select(&body_selector))
    {
        let text = element.text().collect::<Vec<_>>().join(" ");
        body.push_str(text.trim());
        body.push('\n');
    }

    debug!(bytes = body.len(), "Parsed article");
    Some(ArticleRecord {
        article_id: parse_article_id(url),
        headline,
        link: url.to_string(),
        published_date,
        body: body.trim().to_string(),
    })
}
