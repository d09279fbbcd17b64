//! Remote (HTTP/HTTPS) sources.
//!
//! One blocking request per call; there is no retry. Any transport failure or non-success status
//! is reported as [`PipelineError::SourceUnavailable`].

use std::time::Duration;

use log::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

use super::csv::{ingest_csv_from_reader, CsvOptions};

/// Fetch the raw body of `url`.
///
/// The body is not decoded here; [`ingest_csv_from_url`] hands the bytes to the same reader a
/// local file goes through, so invalid UTF-8 is rejected the same way for both.
pub fn fetch_url(url: &str, timeout: Duration) -> PipelineResult<Vec<u8>> {
    let unavailable = |message: String| PipelineError::SourceUnavailable {
        location: url.to_owned(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| unavailable(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| unavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(unavailable(format!("HTTP status {status}")));
    }

    let body = response.bytes().map_err(|e| unavailable(e.to_string()))?.to_vec();
    debug!("fetched {} bytes from {url}", body.len());
    Ok(body)
}

/// Fetch `url` and ingest the body as delimited text.
///
/// Read failures are [`PipelineError::SourceUnavailable`] for `url`; malformed content is a
/// [`PipelineError::ParseError`].
pub fn ingest_csv_from_url(
    url: &str,
    timeout: Duration,
    options: &CsvOptions,
) -> PipelineResult<DataSet> {
    let body = fetch_url(url, timeout)?;
    let mut rdr = options.reader_builder().from_reader(body.as_slice());
    ingest_csv_from_reader(&mut rdr, options).map_err(|e| match e {
        PipelineError::SourceUnavailable { message, .. } => PipelineError::SourceUnavailable {
            location: url.to_owned(),
            message,
        },
        other => other,
    })
}
