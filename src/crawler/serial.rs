//! Spreadsheet-epoch day serialization for archive URLs.
//!
//! The archive site keys each day's listing page by an integer day
//! count inherited from spreadsheet software: day zero is 1899-12-31,
//! and the count includes the nonexistent 1900-02-29 that the epoch's
//! leap-year bug introduced. Dates on or after 1900-03-01 are therefore
//! shifted forward by one.

use chrono::NaiveDate;

/// Convert a calendar date to the archive's day-count serial.
///
/// Pure and total: every valid [`NaiveDate`] maps to exactly one
/// integer, the same one every time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use newsminer::crawler::serial::archive_serial;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(archive_serial(day), 45658);
/// ```
pub fn archive_serial(date: NaiveDate) -> i64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
    let leap_cutoff = NaiveDate::from_ymd_opt(1900, 3, 1).unwrap();

    let mut serial = (date - base).num_days();
    if date >= leap_cutoff {
        serial += 1;
    }
    serial
}
