//! JSON output for the crawled table.
//!
//! Serializes a [`NewsTable`] as one JSON array of record objects,
//! suitable for API consumption or further processing.

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::Result;
use crate::models::NewsTable;

/// Write a [`NewsTable`] to a JSON file.
///
/// Parent directories are created as needed. An empty table writes an
/// empty JSON array.
#[instrument(level = "info", skip(table), fields(%path, records = table.len()))]
pub async fn write_json(table: &NewsTable, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(path, json).await?;
    info!("Wrote JSON table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;
    use chrono::NaiveDate;

    fn sample_table() -> NewsTable {
        NewsTable::from_records(vec![ArticleRecord {
            article_id: Some("1001".to_string()),
            headline: "Sample headline".to_string(),
            link: "https://example.com/markets/articleshow/1001.cms".to_string(),
            published_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            body: "Sample body".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_write_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        let path = path.to_str().unwrap();

        let table = sample_table();
        write_json(&table, path).await.unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        let back: NewsTable = serde_json::from_str(&written).unwrap();
        assert_eq!(back, table);
    }

    #[tokio::test]
    async fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/news.json");
        let path = path.to_str().unwrap();

        write_json(&sample_table(), path).await.unwrap();
        assert!(std::path::Path::new(path).exists());
    }

    #[tokio::test]
    async fn test_write_json_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let path = path.to_str().unwrap();

        write_json(&NewsTable::default(), path).await.unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.trim(), "[]");
    }
}
