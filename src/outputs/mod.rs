//! Output generation modules for the crawled news table.
//!
//! The crawl returns an in-memory [`crate::NewsTable`]; these
//! submodules serialize it for downstream consumption:
//!
//! - [`json`]: one JSON array of record objects
//! - [`csv`]: one CSV file with a header row and one line per record
//!
//! Both formats expose the same columns: `article_id`, `headline`,
//! `link`, `date`, `body`. An empty table produces a valid, empty
//! output rather than an error.

pub mod csv;
pub mod json;
