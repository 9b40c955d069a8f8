//! # Newsminer
//!
//! A date-driven crawler for a daily news archive. Given an inclusive
//! calendar date range, the crawler resolves each day to the site's
//! archive-listing page, extracts the candidate article links it
//! advertises, fetches and parses every admitted article concurrently,
//! and assembles the results into a chronologically ordered,
//! deduplicated table of records.
//!
//! ## Architecture
//!
//! The crawl pipeline runs strictly top-down:
//! 1. **Range**: iterate the requested days sequentially
//! 2. **Day**: fetch the day's archive page and extract candidate links
//! 3. **Articles**: fetch and parse all candidates for the day as one
//!    concurrent batch
//! 4. **Assembly**: deduplicate on `(headline, link)` and sort the
//!    final table by the archive day
//!
//! Failures degrade per item: an unreachable archive page skips that
//! day, a failed article fetch skips that article, and the run
//! continues. Only an invalid date range is an error.
//!
//! ## Usage
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use newsminer::{ArchiveCrawler, CrawlerConfig};
//!
//! # async fn run() -> newsminer::Result<()> {
//! let crawler = ArchiveCrawler::new(CrawlerConfig::default())?;
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
//! let table = crawler.crawl_range(start, end).await?;
//! println!("{} articles", table.len());
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use thiserror::Error;

pub mod cli;
pub mod crawler;
pub mod fetch;
pub mod models;
pub mod outputs;

/// Main error type for newsminer operations.
#[derive(Debug, Error)]
pub enum MinerError {
    /// The requested crawl range has its start after its end. This is
    /// a caller configuration error and is surfaced before any network
    /// activity takes place.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for newsminer operations.
pub type Result<T> = std::result::Result<T, MinerError>;

// Re-export commonly used types
pub use crawler::{ArchiveCrawler, CrawlerConfig};
pub use models::{ArticleRecord, CrawlRange, NewsTable};
