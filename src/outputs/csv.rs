//! CSV output for the crawled table.
//!
//! Serializes a [`NewsTable`] with one header row and one line per
//! record, columns `article_id,headline,link,date,body`. A missing
//! `article_id` becomes an empty cell.

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::models::NewsTable;
use crate::{MinerError, Result};

/// Render a [`NewsTable`] as CSV text.
pub fn table_to_csv(table: &NewsTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in table.iter() {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| MinerError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        MinerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Write a [`NewsTable`] to a CSV file.
///
/// Parent directories are created as needed.
#[instrument(level = "info", skip(table), fields(%path, records = table.len()))]
pub async fn write_csv(table: &NewsTable, path: &str) -> Result<()> {
    let csv_text = table_to_csv(table)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(path, csv_text).await?;
    info!("Wrote CSV table");
    Ok(())
}
