//! Data models for crawled articles and the assembled result table.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`ArticleRecord`]: one article discovered under an archive day
//! - [`CrawlRange`]: a validated inclusive date range to crawl
//! - [`NewsTable`]: the ordered, deduplicated result set for one run
//!
//! Records are immutable after creation; the only aggregate state in a
//! crawl is the accumulator a range crawl folds its days into before
//! handing it to [`NewsTable::from_records`].

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{MinerError, Result};

/// One article discovered on an archive page.
///
/// The `(headline, link)` pair is the record's canonical identity:
/// within a finished [`NewsTable`] no two records share it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Numeric identifier parsed from the article URL, or `None` when
    /// the URL shape is unrecognized.
    pub article_id: Option<String>,
    /// Display title, whitespace-trimmed.
    pub headline: String,
    /// Absolute article URL.
    pub link: String,
    /// The archive day the article was discovered under. The archive
    /// groups articles by day, so this is the day-bucket rather than
    /// the article's own publish timestamp; articles published near
    /// midnight may be attributed to the neighboring day.
    #[serde(rename = "date")]
    pub published_date: NaiveDate,
    /// Concatenated text of the recognized content blocks. Empty when
    /// extraction found none.
    pub body: String,
}

impl ArticleRecord {
    /// Identity key used for range-wide deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.headline.clone(), self.link.clone())
    }
}

/// A validated inclusive date range for one crawl run.
///
/// Construction enforces `start <= end`; a violation is reported as
/// [`MinerError::InvalidRange`] rather than silently corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl CrawlRange {
    /// Create a range covering `start` through `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`MinerError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(MinerError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Iterate every day in the range, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days covered, always at least one.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The assembled result set of one crawl: records sorted ascending by
/// their archive day, with `(headline, link)` duplicates removed.
///
/// An empty table is a valid outcome for days or ranges with no
/// matching articles.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NewsTable {
    records: Vec<ArticleRecord>,
}

impl NewsTable {
    /// Build a table from records in discovery order.
    ///
    /// Deduplicates on `(headline, link)` keeping the first occurrence
    /// (the earliest archive day, given day-ordered input), then sorts
    /// ascending by [`ArticleRecord::published_date`]. The sort is
    /// stable, so within a day the discovery order survives.
    pub fn from_records(records: Vec<ArticleRecord>) -> Self {
        let mut records: Vec<ArticleRecord> = records
            .into_iter()
            .unique_by(|r| r.dedup_key())
            .collect();
        records.sort_by_key(|r| r.published_date);
        Self { records }
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in table order.
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Iterate the records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }

    /// Records discovered under one archive day.
    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter().filter(move |r| r.published_date == date)
    }

    /// Consume the table, yielding the owned records.
    pub fn into_records(self) -> Vec<ArticleRecord> {
        self.records
    }
}

impl IntoIterator for NewsTable {
    type Item = ArticleRecord;
    type IntoIter = std::vec::IntoIter<ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
