//! Core data model types.
//!
//! A [`DataSet`] is a columnar table: an ordered [`Schema`] of typed [`Field`]s and one [`Column`]
//! per field, all of the same length. Missing entries are stored as `None` and surface as
//! [`Value::Null`] in row views.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Numeric column, stored as 64-bit floats.
    Float64,
    /// Categorical/string column.
    Utf8,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float64 => f.write_str("float64"),
            Self::Utf8 => f.write_str("utf8"),
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the field with the given name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single typed value, as seen through a row view of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    Null,
    /// Numeric value.
    Float64(f64),
    /// Categorical/string value.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric payload, if this is a [`Value::Float64`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NaN"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
        }
    }
}

/// Column storage. `None` marks a missing entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float64(Vec<Option<f64>>),
    Utf8(Vec<Option<String>>),
}

impl Column {
    /// Logical type of the values held by this column.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Float64(_) => DataType::Float64,
            Self::Utf8(_) => DataType::Utf8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Float64(v) => v.len(),
            Self::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `idx`, or `None` when out of range.
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            Self::Float64(v) => v.get(idx).map(|x| x.map(Value::Float64).unwrap_or(Value::Null)),
            Self::Utf8(v) => v
                .get(idx)
                .map(|x| x.clone().map(Value::Utf8).unwrap_or(Value::Null)),
        }
    }

    /// Number of missing entries.
    pub fn null_count(&self) -> usize {
        match self {
            Self::Float64(v) => v.iter().filter(|x| x.is_none()).count(),
            Self::Utf8(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Returns `true` if the entry at `idx` is missing.
    pub fn is_null(&self, idx: usize) -> bool {
        match self {
            Self::Float64(v) => matches!(v.get(idx), Some(None)),
            Self::Utf8(v) => matches!(v.get(idx), Some(None)),
        }
    }

    /// Numeric storage, if this is a numeric column.
    pub fn as_f64(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Float64(v) => Some(v),
            Self::Utf8(_) => None,
        }
    }

    /// String storage, if this is a categorical column.
    pub fn as_utf8(&self) -> Option<&[Option<String>]> {
        match self {
            Self::Utf8(v) => Some(v),
            Self::Float64(_) => None,
        }
    }

    fn take(&self, indices: &[usize]) -> Self {
        match self {
            Self::Float64(v) => Self::Float64(indices.iter().map(|&i| v[i]).collect()),
            Self::Utf8(v) => Self::Utf8(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }
}

/// In-memory tabular dataset.
///
/// Columns are stored in schema order and always share one row count. The dataset also keeps,
/// per column, the names of the transforms already applied to it (see
/// [`crate::processing::transform_column`]).
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
    lineage: BTreeMap<String, Vec<String>>,
}

impl DataSet {
    /// Create a dataset from a schema and one column per field.
    ///
    /// Fails with [`PipelineError::SchemaMismatch`] if the column count, a column type, or a
    /// column length disagrees with the schema/other columns.
    pub fn new(schema: Schema, columns: Vec<Column>) -> PipelineResult<Self> {
        if schema.fields.len() != columns.len() {
            return Err(PipelineError::SchemaMismatch {
                message: format!(
                    "schema has {} fields but {} columns were provided",
                    schema.fields.len(),
                    columns.len()
                ),
            });
        }

        let row_count = columns.first().map(Column::len).unwrap_or(0);
        for (field, column) in schema.fields.iter().zip(&columns) {
            if field.data_type != column.data_type() {
                return Err(PipelineError::SchemaMismatch {
                    message: format!(
                        "column '{}' declared {} but holds {} values",
                        field.name,
                        field.data_type,
                        column.data_type()
                    ),
                });
            }
            if column.len() != row_count {
                return Err(PipelineError::SchemaMismatch {
                    message: format!(
                        "column '{}' has {} rows, expected {row_count}",
                        field.name,
                        column.len()
                    ),
                });
            }
        }

        Ok(Self {
            schema,
            columns,
            row_count,
            lineage: BTreeMap::new(),
        })
    }

    /// Create a dataset from row-major values.
    ///
    /// Each row must have one value per field; values must be [`Value::Null`] or match the field
    /// type. The row count is `rows.len()`, also for a schema without fields.
    pub fn from_rows(schema: Schema, rows: Vec<Vec<Value>>) -> PipelineResult<Self> {
        let row_count = rows.len();
        let mut columns: Vec<Column> = schema
            .fields
            .iter()
            .map(|f| match f.data_type {
                DataType::Float64 => Column::Float64(Vec::with_capacity(rows.len())),
                DataType::Utf8 => Column::Utf8(Vec::with_capacity(rows.len())),
            })
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != schema.fields.len() {
                return Err(PipelineError::SchemaMismatch {
                    message: format!(
                        "row {row_idx} has {} values, expected {}",
                        row.len(),
                        schema.fields.len()
                    ),
                });
            }
            for ((field, column), value) in schema.fields.iter().zip(columns.iter_mut()).zip(row) {
                match (column, value) {
                    (Column::Float64(v), Value::Null) => v.push(None),
                    (Column::Float64(v), Value::Float64(x)) => v.push(Some(x)),
                    (Column::Utf8(v), Value::Null) => v.push(None),
                    (Column::Utf8(v), Value::Utf8(s)) => v.push(Some(s)),
                    (column, value) => {
                        return Err(PipelineError::SchemaMismatch {
                            message: format!(
                                "row {row_idx} column '{}': value {value:?} does not fit {}",
                                field.name,
                                column.data_type()
                            ),
                        });
                    }
                }
            }
        }

        let mut dataset = Self::new(schema, columns)?;
        dataset.row_count = row_count;
        Ok(dataset)
    }

    /// Schema describing the columns.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    /// Columns in schema order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> PipelineResult<&Column> {
        let idx = self.index_of(name)?;
        Ok(&self.columns[idx])
    }

    pub(crate) fn numeric_column_mut(&mut self, name: &str) -> PipelineResult<&mut Vec<Option<f64>>> {
        let idx = self.index_of(name)?;
        match &mut self.columns[idx] {
            Column::Float64(values) => Ok(values),
            Column::Utf8(_) => Err(PipelineError::TypeMismatch {
                column: name.to_owned(),
                expected: DataType::Float64,
                actual: DataType::Utf8,
            }),
        }
    }

    /// Numeric storage of `name`, or [`PipelineError::TypeMismatch`] for a categorical column.
    pub fn numeric_column(&self, name: &str) -> PipelineResult<&[Option<f64>]> {
        let column = self.column(name)?;
        column.as_f64().ok_or_else(|| PipelineError::TypeMismatch {
            column: name.to_owned(),
            expected: DataType::Float64,
            actual: column.data_type(),
        })
    }

    /// String storage of `name`, or [`PipelineError::TypeMismatch`] for a numeric column.
    pub fn categorical_column(&self, name: &str) -> PipelineResult<&[Option<String>]> {
        let column = self.column(name)?;
        column.as_utf8().ok_or_else(|| PipelineError::TypeMismatch {
            column: name.to_owned(),
            expected: DataType::Utf8,
            actual: column.data_type(),
        })
    }

    /// Row `idx` as values in schema order.
    pub fn row(&self, idx: usize) -> Option<Vec<Value>> {
        if idx >= self.row_count {
            return None;
        }
        self.columns.iter().map(|c| c.get(idx)).collect()
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count).filter_map(|idx| self.row(idx))
    }

    /// First `n` rows (or all rows, if fewer).
    pub fn head(&self, n: usize) -> Self {
        let indices: Vec<usize> = (0..self.row_count.min(n)).collect();
        self.select_rows(&indices)
    }

    /// Create a new dataset containing only rows whose index matches `predicate`.
    ///
    /// The returned dataset preserves the schema, column types and transform lineage.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.row_count).filter(|&idx| predicate(idx)).collect();
        self.select_rows(&indices)
    }

    /// Create a new dataset from the rows at `indices`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            schema: self.schema.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            row_count: indices.len(),
            lineage: self.lineage.clone(),
        }
    }

    /// Names of the transforms already applied to `column`, oldest first.
    pub fn applied_transforms(&self, column: &str) -> &[String] {
        self.lineage.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn record_transform(&mut self, column: &str, transform: String) {
        self.lineage.entry(column.to_owned()).or_default().push(transform);
    }

    fn index_of(&self, name: &str) -> PipelineResult<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| PipelineError::ColumnNotFound {
                column: name.to_owned(),
            })
    }
}

impl fmt::Display for DataSet {
    /// Plain aligned table with a leading row-index column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![String::new()];
        header.extend(self.schema.field_names().map(str::to_owned));

        let body: Vec<Vec<String>> = self
            .rows()
            .enumerate()
            .map(|(idx, row)| {
                let mut cells = vec![idx.to_string()];
                cells.extend(row.iter().map(Value::to_string));
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(body.iter()) {
            let line = row
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, w)| format!("{cell:>w$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        write!(f, "[{} rows x {} columns]", self.row_count, self.columns.len())
    }
}
