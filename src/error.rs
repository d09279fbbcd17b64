use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for loading and processing operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned across loading, processing and pipeline configuration.
///
/// No operation recovers from these; they are surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input path or URL could not be read (missing file, refused connection, HTTP error
    /// status, ...).
    #[error("source unavailable: {location}: {message}")]
    SourceUnavailable { location: String, message: String },

    /// The input is not valid delimited tabular data: no header row, rows with differing field
    /// counts, invalid UTF-8, or a cell that does not parse as its column's [`DataType`].
    ///
    /// `line` is the 1-based line of the input where the offending record starts.
    #[error("failed to parse input at line {line}: {message}")]
    ParseError {
        line: u64,
        /// Column of the offending cell, when the failure is tied to one cell.
        column: Option<String>,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A requested schema column is absent from the input, or a dataset was constructed from
    /// columns that disagree with its schema.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A referenced column is absent from the dataset.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// Mean imputation was requested on a column without any non-missing value.
    #[error("mean of column '{column}' is undefined: no non-missing values")]
    UndefinedMean { column: String },

    /// An operation was applied to a column of the wrong type.
    #[error("column '{column}' has type {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    /// The same transform was already applied to this column.
    #[error("transform '{transform}' was already applied to column '{column}'")]
    TransformAlreadyApplied { column: String, transform: String },

    /// The pipeline configuration could not be read or decoded.
    #[error("invalid pipeline config: {message}")]
    Config { message: String },
}
