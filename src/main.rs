//! # Newsminer
//!
//! Binary entry point: crawl a daily news archive over a date range
//! and emit the resulting table as JSON and/or CSV.
//!
//! ## Usage
//!
//! ```sh
//! newsminer -s 2025-01-01 -e 2025-01-02 -j ./news.json
//! ```
//!
//! With no output flag the table is printed as JSON to stdout. The
//! `RUST_LOG` environment variable controls log verbosity.

use clap::Parser;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

use newsminer::Result;
use newsminer::cli::Cli;
use newsminer::crawler::{ArchiveCrawler, CrawlerConfig};
use newsminer::outputs;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsminer starting up");

    let args = Cli::parse();
    debug!(?args.start_date, ?args.end_date, "Parsed CLI arguments");

    let config = CrawlerConfig {
        base_url: Url::parse(&args.base_url)?,
        max_concurrent_fetches: args.max_concurrent,
        request_timeout: Duration::from_secs(args.timeout_secs),
        ..CrawlerConfig::default()
    };

    let crawler = ArchiveCrawler::new(config)?;
    let table = crawler.crawl_range(args.start_date, args.end_date).await?;
    info!(
        records = table.len(),
        start = %args.start_date,
        end = %args.end_date,
        "Assembled news table"
    );

    if let Some(ref path) = args.json_output {
        outputs::json::write_json(&table, path).await?;
    }
    if let Some(ref path) = args.csv_output {
        outputs::csv::write_csv(&table, path).await?;
    }
    if args.json_output.is_none() && args.csv_output.is_none() {
        println!("{}", serde_json::to_string_pretty(&table)?);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
