//! Command-line interface definitions for newsminer.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Dates are parsed directly into [`chrono::NaiveDate`] values, so an
//! unparseable date fails at argument parsing rather than mid-crawl.

use chrono::NaiveDate;
use clap::Parser;

use crate::crawler::DEFAULT_BASE_URL;

/// Command-line arguments for the newsminer binary.
///
/// # Examples
///
/// ```sh
/// # Crawl two days and print the table as JSON to stdout
/// newsminer -s 2025-01-01 -e 2025-01-02
///
/// # Write JSON and CSV files
/// newsminer -s 2025-01-01 -e 2025-01-31 -j ./news.json -c ./news.csv
///
/// # Throttle to 5 concurrent article fetches
/// newsminer -s 2025-01-01 -e 2025-01-02 --max-concurrent 5
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// First archive day to crawl (inclusive), ISO format YYYY-MM-DD
    #[arg(short, long)]
    pub start_date: NaiveDate,

    /// Last archive day to crawl (inclusive), ISO format YYYY-MM-DD
    #[arg(short, long)]
    pub end_date: NaiveDate,

    /// Write the crawled table to this JSON file
    #[arg(short, long)]
    pub json_output: Option<String>,

    /// Write the crawled table to this CSV file
    #[arg(short, long)]
    pub csv_output: Option<String>,

    /// Maximum simultaneous article fetches within one day
    #[arg(long, default_value_t = 10)]
    pub max_concurrent: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,

    /// Archive site origin
    #[arg(long, env = "NEWSMINER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}
