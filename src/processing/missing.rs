//! Missing-value reporting and mean imputation.

use log::debug;
use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Value};

use super::reduce::{reduce, ReduceOp};

/// Number of missing entries in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Outcome of [`impute_mean`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imputation {
    /// Imputed column.
    pub column: String,
    /// Mean of the non-missing values before imputation; written into every missing entry.
    pub fill_value: f64,
    /// Missing entries before imputation.
    pub missing_before: usize,
    /// Missing entries after imputation (always 0).
    pub missing_after: usize,
}

/// Missing entries per column, in schema order.
pub fn missing_counts(dataset: &DataSet) -> Vec<MissingCount> {
    dataset
        .schema()
        .field_names()
        .zip(dataset.columns())
        .map(|(name, column)| MissingCount {
            column: name.to_owned(),
            missing: column.null_count(),
        })
        .collect()
}

/// Missing entries in `column`.
pub fn missing_count(dataset: &DataSet, column: &str) -> PipelineResult<usize> {
    Ok(dataset.column(column)?.null_count())
}

/// Replace every missing entry of a numeric column with the mean of its non-missing entries.
///
/// The mean is computed once, before any entry is replaced.
///
/// # Errors
///
/// - [`PipelineError::ColumnNotFound`] if `column` does not exist.
/// - [`PipelineError::TypeMismatch`] if `column` is not numeric.
/// - [`PipelineError::UndefinedMean`] if `column` has no non-missing entries.
pub fn impute_mean(dataset: &mut DataSet, column: &str) -> PipelineResult<Imputation> {
    let missing_before = dataset.numeric_column(column)?.iter().filter(|v| v.is_none()).count();

    let fill_value = match reduce(dataset, column, ReduceOp::Mean) {
        Some(Value::Float64(mean)) => mean,
        _ => {
            return Err(PipelineError::UndefinedMean {
                column: column.to_owned(),
            });
        }
    };

    for v in dataset.numeric_column_mut(column)?.iter_mut().filter(|v| v.is_none()) {
        *v = Some(fill_value);
    }

    debug!("imputed {missing_before} missing entries of '{column}' with {fill_value}");
    Ok(Imputation {
        column: column.to_owned(),
        fill_value,
        missing_before,
        missing_after: dataset.column(column)?.null_count(),
    })
}

/// Rows without a missing entry in any column.
pub fn drop_missing(dataset: &DataSet) -> DataSet {
    dataset.filter_rows(|idx| dataset.columns().iter().all(|c| !c.is_null(idx)))
}
