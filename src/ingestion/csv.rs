//! Delimited text ingestion.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Column, DataSet, DataType, Field, Schema};

/// Options controlling how delimited text is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Cell contents (after trimming) treated as missing. Empty cells are always missing.
    pub null_values: Vec<String>,
    /// If set, only these columns are loaded, with the given types. If `None`, every column is
    /// loaded and its type inferred.
    pub schema: Option<Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_values: ["NA", "N/A", "NaN", "nan", "null", "NULL"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            schema: None,
        }
    }
}

impl CsvOptions {
    /// A `csv` reader builder configured for these options.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(true).delimiter(self.delimiter);
        builder
    }

    fn is_missing(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || self.null_values.iter().any(|n| n == trimmed)
    }
}

/// Ingest a delimited file into an in-memory [`DataSet`].
///
/// A file that cannot be opened is reported as [`PipelineError::SourceUnavailable`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::SourceUnavailable {
        location: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut rdr = options.reader_builder().from_reader(file);
    ingest_csv_from_reader(&mut rdr, options).map_err(|e| match e {
        PipelineError::SourceUnavailable { message, .. } => PipelineError::SourceUnavailable {
            location: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Ingest delimited text held in memory.
pub fn ingest_csv_from_str(input: &str, options: &CsvOptions) -> PipelineResult<DataSet> {
    let mut rdr = options.reader_builder().from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr, options)
}

/// Ingest delimited data from an existing reader.
///
/// Rules:
///
/// - The input must be UTF-8 and start with a header row.
/// - Every record must have as many fields as the header.
/// - Violations of the above, and cells that do not parse, are [`PipelineError::ParseError`]s
///   carrying the input line where the offending record starts.
/// - With an explicit schema, every schema field must appear in the header (order can differ)
///   and every non-missing cell must parse as the field type.
/// - Without a schema, a column is [`DataType::Float64`] when all of its non-missing cells parse
///   as numbers, otherwise [`DataType::Utf8`].
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    options: &CsvOptions,
) -> PipelineResult<DataSet> {
    let headers = rdr.headers().map_err(csv_failure)?.clone();
    if headers.is_empty() {
        return Err(PipelineError::ParseError {
            line: 1,
            column: None,
            message: "input has no header row".to_string(),
            source: None,
        });
    }

    let records = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_failure)?;

    // (csv column index, field) for every column to load.
    let plan: Vec<(usize, Field)> = match &options.schema {
        Some(schema) => {
            let mut plan = Vec::with_capacity(schema.fields.len());
            for field in &schema.fields {
                match headers.iter().position(|h| h == field.name) {
                    Some(idx) => plan.push((idx, field.clone())),
                    None => {
                        return Err(PipelineError::SchemaMismatch {
                            message: format!(
                                "missing required column '{field}'. headers={:?}",
                                headers.iter().collect::<Vec<_>>(),
                                field = field.name
                            ),
                        });
                    }
                }
            }
            plan
        }
        None => headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = infer_type(&records, idx, options);
                debug!("inferred column '{name}' as {data_type}");
                (idx, Field::new(name, data_type))
            })
            .collect(),
    };

    let mut columns = Vec::with_capacity(plan.len());
    for (csv_idx, field) in &plan {
        let column = match field.data_type {
            DataType::Utf8 => Column::Utf8(
                records
                    .iter()
                    .map(|r| r.get(*csv_idx).unwrap_or(""))
                    .map(|raw| (!options.is_missing(raw)).then(|| raw.trim().to_owned()))
                    .collect(),
            ),
            DataType::Float64 => {
                let mut values = Vec::with_capacity(records.len());
                for record in &records {
                    let raw = record.get(*csv_idx).unwrap_or("");
                    let line = record.position().map_or(0, |p| p.line());
                    values.push(parse_number(line, &field.name, raw, options)?);
                }
                Column::Float64(values)
            }
        };
        columns.push(column);
    }

    let schema = Schema::new(plan.into_iter().map(|(_, field)| field).collect());
    DataSet::new(schema, columns)
}

fn infer_type(records: &[csv::StringRecord], idx: usize, options: &CsvOptions) -> DataType {
    let numeric = records
        .iter()
        .filter_map(|r| r.get(idx))
        .filter(|raw| !options.is_missing(raw))
        .all(|raw| raw.trim().parse::<f64>().is_ok());
    if numeric {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Maps a reader failure: I/O errors mean the source could not be read, everything else is
/// malformed content.
fn csv_failure(err: csv::Error) -> PipelineError {
    if let csv::ErrorKind::Io(io) = err.kind() {
        return PipelineError::SourceUnavailable {
            location: "input".to_string(),
            message: io.to_string(),
        };
    }
    PipelineError::ParseError {
        line: err.position().map_or(1, |p| p.line()),
        column: None,
        message: err.to_string(),
        source: Some(err),
    }
}

fn parse_number(
    line: u64,
    column: &str,
    raw: &str,
    options: &CsvOptions,
) -> PipelineResult<Option<f64>> {
    if options.is_missing(raw) {
        return Ok(None);
    }
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PipelineError::ParseError {
            line,
            column: Some(column.to_owned()),
            message: format!("column '{column}': cannot parse '{raw}' as {}: {e}", DataType::Float64),
            source: None,
        })
}
