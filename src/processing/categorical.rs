//! Frequency counts and membership filters over categorical columns.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::PipelineResult;
use crate::types::{Column, DataSet, Value};

/// One distinct value and the number of rows holding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

#[derive(PartialEq, Eq, Hash)]
enum Key<'a> {
    Num(u64),
    Text(&'a str),
}

fn num_key(v: f64) -> u64 {
    // Fold -0.0 into 0.0.
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

#[derive(Default)]
struct Tally<'a> {
    slots: HashMap<Key<'a>, usize>,
    counts: Vec<ValueCount>,
}

impl<'a> Tally<'a> {
    fn bump(&mut self, key: Key<'a>, value: impl FnOnce() -> Value) {
        match self.slots.get(&key) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.slots.insert(key, self.counts.len());
                self.counts.push(ValueCount {
                    value: value(),
                    count: 1,
                });
            }
        }
    }
}

/// Distinct non-missing values of `column` with their row counts.
///
/// Sorted by descending count; ties keep first-seen order. Works on both numeric and
/// categorical columns.
pub fn value_counts(dataset: &DataSet, column: &str) -> PipelineResult<Vec<ValueCount>> {
    let column = dataset.column(column)?;

    let mut tally = Tally::default();
    match column {
        Column::Float64(values) => {
            for &v in values.iter().flatten() {
                tally.bump(Key::Num(num_key(v)), || Value::Float64(v));
            }
        }
        Column::Utf8(values) => {
            for s in values.iter().flatten() {
                tally.bump(Key::Text(s), || Value::Utf8(s.clone()));
            }
        }
    }

    let mut counts = tally.counts;
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Rows whose `column` value is one of `allowed`. Missing entries never match.
///
/// # Errors
///
/// [`crate::PipelineError::ColumnNotFound`] or [`crate::PipelineError::TypeMismatch`] (numeric
/// column).
pub fn filter_in<S: AsRef<str>>(dataset: &DataSet, column: &str, allowed: &[S]) -> PipelineResult<DataSet> {
    let mask = membership(dataset, column, allowed)?;
    Ok(dataset.filter_rows(|idx| mask[idx]))
}

/// Rows whose `column` value is NOT one of `allowed`, including rows where it is missing.
///
/// Together with [`filter_in`] for the same arguments this partitions the dataset.
pub fn filter_not_in<S: AsRef<str>>(dataset: &DataSet, column: &str, allowed: &[S]) -> PipelineResult<DataSet> {
    let mask = membership(dataset, column, allowed)?;
    Ok(dataset.filter_rows(|idx| !mask[idx]))
}

fn membership<S: AsRef<str>>(dataset: &DataSet, column: &str, allowed: &[S]) -> PipelineResult<Vec<bool>> {
    let values = dataset.categorical_column(column)?;
    let allowed: HashSet<&str> = allowed.iter().map(|s| s.as_ref()).collect();
    Ok(values
        .iter()
        .map(|v| v.as_deref().is_some_and(|s| allowed.contains(s)))
        .collect())
}
