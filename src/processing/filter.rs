//! Row filtering for [`crate::types::DataSet`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// `predicate` sees each row as values in schema order.
pub fn filter<F>(dataset: &DataSet, mut predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(|idx| dataset.row(idx).is_some_and(|row| predicate(&row)))
}

/// Numeric comparison against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    /// `value <op> threshold`.
    pub fn evaluate(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Ge => value >= threshold,
            Self::Lt => value < threshold,
            Self::Le => value <= threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            other => Err(format!("unknown comparison operator '{other}' (expected >, >=, <, <=)")),
        }
    }
}

/// Which side of a comparison [`filter_range`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Rows satisfying the comparison.
    #[default]
    Matching,
    /// Rows NOT satisfying the comparison (including rows where the value is missing).
    Complement,
}

/// Rows of `column` satisfying (or, with [`FilterMode::Complement`], not satisfying)
/// `value <op> threshold`.
///
/// Missing entries never satisfy a comparison.
///
/// # Errors
///
/// [`crate::PipelineError::ColumnNotFound`] or [`crate::PipelineError::TypeMismatch`] (categorical
/// column).
pub fn filter_range(
    dataset: &DataSet,
    column: &str,
    op: CompareOp,
    threshold: f64,
    mode: FilterMode,
) -> PipelineResult<DataSet> {
    let mask = comparison_mask(dataset, column, op, threshold)?;
    let keep = mode == FilterMode::Matching;
    Ok(dataset.filter_rows(|idx| mask[idx] == keep))
}

/// Both halves of [`filter_range`] at once: `(matching, complement)`.
///
/// Every input row lands in exactly one half; row order is preserved within each.
pub fn partition_range(
    dataset: &DataSet,
    column: &str,
    op: CompareOp,
    threshold: f64,
) -> PipelineResult<(DataSet, DataSet)> {
    let mask = comparison_mask(dataset, column, op, threshold)?;
    let matching = dataset.filter_rows(|idx| mask[idx]);
    let complement = dataset.filter_rows(|idx| !mask[idx]);
    Ok((matching, complement))
}

fn comparison_mask(
    dataset: &DataSet,
    column: &str,
    op: CompareOp,
    threshold: f64,
) -> PipelineResult<Vec<bool>> {
    let values = dataset.numeric_column(column)?;
    Ok(values
        .iter()
        .map(|v| v.is_some_and(|v| op.evaluate(v, threshold)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::types::{DataType, Field, Schema};

    fn weights(values: &[Option<f64>]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Model", DataType::Utf8),
            Field::new("Weight", DataType::Float64),
        ]);
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, w)| {
                vec![
                    Value::Utf8(format!("m{i}")),
                    w.map(Value::Float64).unwrap_or(Value::Null),
                ]
            })
            .collect();
        DataSet::from_rows(schema, rows).unwrap()
    }

    fn weight_values(ds: &DataSet) -> Vec<Option<f64>> {
        ds.numeric_column("Weight").unwrap().to_vec()
    }

    #[test]
    fn filter_by_row_predicate() {
        let ds = weights(&[Some(3000.0), Some(4500.0)]);
        let out = filter(&ds, |row| matches!(row.get(1), Some(Value::Float64(v)) if *v > 4000.0));
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.row(0).unwrap()[0], Value::Utf8("m1".to_string()));
    }

    #[test]
    fn range_filter_and_complement() {
        let ds = weights(&[Some(3000.0), Some(4500.0), Some(4000.0), Some(5000.0)]);

        let heavy = filter_range(&ds, "Weight", CompareOp::Gt, 4000.0, FilterMode::Matching).unwrap();
        assert_eq!(weight_values(&heavy), vec![Some(4500.0), Some(5000.0)]);

        let rest = filter_range(&ds, "Weight", CompareOp::Gt, 4000.0, FilterMode::Complement).unwrap();
        assert_eq!(weight_values(&rest), vec![Some(3000.0), Some(4000.0)]);
    }

    #[test]
    fn boundary_operators() {
        let ds = weights(&[Some(3000.0), Some(4000.0), Some(5000.0)]);
        let count = |op| {
            filter_range(&ds, "Weight", op, 4000.0, FilterMode::Matching)
                .unwrap()
                .row_count()
        };
        assert_eq!(count(CompareOp::Gt), 1);
        assert_eq!(count(CompareOp::Ge), 2);
        assert_eq!(count(CompareOp::Lt), 1);
        assert_eq!(count(CompareOp::Le), 2);
    }

    #[test]
    fn missing_values_land_in_complement() {
        let ds = weights(&[Some(4500.0), None]);
        let (matching, complement) = partition_range(&ds, "Weight", CompareOp::Gt, 4000.0).unwrap();
        assert_eq!(weight_values(&matching), vec![Some(4500.0)]);
        assert_eq!(weight_values(&complement), vec![None]);
    }

    #[test]
    fn range_filter_rejects_categorical_column() {
        let ds = weights(&[Some(1.0)]);
        assert!(matches!(
            filter_range(&ds, "Model", CompareOp::Gt, 0.0, FilterMode::Matching),
            Err(PipelineError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn compare_op_parses_symbols() {
        assert_eq!(">=".parse::<CompareOp>(), Ok(CompareOp::Ge));
        assert_eq!(" < ".parse::<CompareOp>(), Ok(CompareOp::Lt));
        assert!("==".parse::<CompareOp>().is_err());
        assert_eq!(CompareOp::Le.to_string(), "<=");
        assert_eq!(serde_json::from_str::<CompareOp>("\">\"").unwrap(), CompareOp::Gt);
    }
}
