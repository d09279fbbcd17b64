//! Reduction operations for [`crate::types::DataSet`].

use crate::types::{Column, DataSet, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
    /// Arithmetic mean of numeric values, ignoring nulls.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`/`Mean`, returns `Some(Value::Null)` if there are no non-null values
///   or the column is not numeric.
/// - For `Count`, always returns `Some(Value::Float64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let column = dataset.column(column).ok()?;

    match (op, column) {
        (ReduceOp::Count, _) => Some(Value::Float64(dataset.row_count() as f64)),
        (_, Column::Float64(values)) => Some(reduce_numeric(values, op)),
        (_, Column::Utf8(_)) => Some(Value::Null),
    }
}

fn reduce_numeric(values: &[Option<f64>], op: ReduceOp) -> Value {
    let mut acc: Option<f64> = None;
    let mut n = 0usize;
    for v in values.iter().flatten() {
        n += 1;
        acc = Some(match (op, acc) {
            (ReduceOp::Min, Some(a)) => a.min(*v),
            (ReduceOp::Max, Some(a)) => a.max(*v),
            (_, Some(a)) => a + v,
            (_, None) => *v,
        });
    }

    match (op, acc) {
        (_, None) => Value::Null,
        (ReduceOp::Mean, Some(sum)) => Value::Float64(sum / n as f64),
        (_, Some(a)) => Value::Float64(a),
    }
}
