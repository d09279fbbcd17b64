//! Unified loading entrypoint.
//!
//! Most callers should use [`load`], which reads a [`DataSource`] (local path or HTTP(S) URL)
//! into an in-memory [`crate::types::DataSet`].
//!
//! - Column types are inferred unless [`CsvOptions::schema`] is set.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::PipelineResult;
use crate::types::DataSet;

use super::csv::{ingest_csv_from_path, CsvOptions};
use super::http::ingest_csv_from_url;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl FromStr for DataSource {
    type Err = Infallible;

    /// Strings starting with `http://` or `https://` (case-insensitive) are URLs; anything else is
    /// a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.to_owned()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Options controlling [`load`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Parsing options (delimiter, missing-value tokens, optional schema).
    pub csv: CsvOptions,
    /// Timeout for the single HTTP request made for URL sources.
    pub http_timeout: Duration,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("csv", &self.csv)
            .field("http_timeout", &self.http_timeout)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            http_timeout: Duration::from_secs(30),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load a dataset from a path or URL.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use tabular_pipeline::ingestion::{load, DataSource, LoadOptions};
///
/// # fn main() -> Result<(), tabular_pipeline::PipelineError> {
/// let source: DataSource = "cars.csv".parse().unwrap();
/// let ds = load(&source, &LoadOptions::default())?;
/// println!("shape={:?}", ds.shape());
/// # Ok(())
/// # }
/// ```
pub fn load(source: &DataSource, options: &LoadOptions) -> PipelineResult<DataSet> {
    let result = match source {
        DataSource::Path(path) => ingest_csv_from_path(path, &options.csv),
        DataSource::Url(url) => ingest_csv_from_url(url, options.http_timeout, &options.csv),
    };

    if let Some(obs) = options.observer.as_ref() {
        let ctx = IngestionContext {
            source: source.clone(),
        };
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = IngestionSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}
