//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load`] (from [`unified`]) which:
//!
//! - reads a local file or fetches an HTTP(S) URL
//! - parses delimited text into an in-memory [`crate::types::DataSet`], inferring column types
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Lower-level functions are available under [`csv`] and [`http`].

pub mod csv;
pub mod http;
pub mod observability;
pub mod unified;

pub use csv::{ingest_csv_from_path, ingest_csv_from_reader, ingest_csv_from_str, CsvOptions};
pub use http::{fetch_url, ingest_csv_from_url};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, LogObserver,
};
pub use unified::{load, DataSource, LoadOptions};
