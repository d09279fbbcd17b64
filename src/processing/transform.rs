//! Elementwise numeric column transforms.
//!
//! A transform is applied in place and recorded on the dataset under its [`ColumnTransform::name`];
//! applying a transform with the same name to the same column again is refused, so a transform
//! cannot be silently re-applied.

use std::fmt;

use log::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

/// A pure unary function over numeric values.
pub trait ColumnTransform {
    /// Identifies the transform in the dataset's lineage.
    fn name(&self) -> String;

    fn apply(&self, value: f64) -> f64;
}

/// `v + k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddConstant(pub f64);

impl ColumnTransform for AddConstant {
    fn name(&self) -> String {
        format!("add({})", self.0)
    }

    fn apply(&self, value: f64) -> f64 {
        value + self.0
    }
}

/// A named closure.
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").field("name", &self.name).finish()
    }
}

impl<F> ColumnTransform for FnTransform<F>
where
    F: Fn(f64) -> f64,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn apply(&self, value: f64) -> f64 {
        (self.func)(value)
    }
}

/// Replace every non-missing value `v` of a numeric column with `transform.apply(v)`, in place.
///
/// Missing entries stay missing; row order and all other columns are untouched.
///
/// # Errors
///
/// - [`PipelineError::ColumnNotFound`] if `column` does not exist.
/// - [`PipelineError::TypeMismatch`] if `column` is not numeric.
/// - [`PipelineError::TransformAlreadyApplied`] if a transform with the same name was already
///   applied to `column`; the dataset is left unchanged.
pub fn transform_column(
    dataset: &mut DataSet,
    column: &str,
    transform: &dyn ColumnTransform,
) -> PipelineResult<()> {
    // Type errors take precedence over lineage errors.
    dataset.numeric_column(column)?;

    let name = transform.name();
    if dataset.applied_transforms(column).contains(&name) {
        return Err(PipelineError::TransformAlreadyApplied {
            column: column.to_owned(),
            transform: name,
        });
    }

    for v in dataset.numeric_column_mut(column)?.iter_mut().flatten() {
        *v = transform.apply(*v);
    }

    debug!("applied {name} to '{column}'");
    dataset.record_transform(column, name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema, Value};

    fn mpg() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Model", DataType::Utf8),
            Field::new("MPG_City", DataType::Float64),
        ]);
        DataSet::from_rows(
            schema,
            vec![
                vec![Value::Utf8("MDX".to_string()), Value::Float64(20.0)],
                vec![Value::Utf8("RSX".to_string()), Value::Float64(25.0)],
                vec![Value::Utf8("TSX".to_string()), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn add_constant_updates_column_in_place() {
        let mut ds = mpg();
        let before = ds.clone();
        transform_column(&mut ds, "MPG_City", &AddConstant(3.0)).unwrap();

        assert_eq!(
            ds.numeric_column("MPG_City").unwrap(),
            &[Some(23.0), Some(28.0), None]
        );
        assert_eq!(ds.column("Model").unwrap(), before.column("Model").unwrap());
        assert_eq!(ds.row_count(), before.row_count());
        assert_eq!(ds.applied_transforms("MPG_City"), &["add(3)".to_string()]);
    }

    #[test]
    fn reapplying_same_transform_is_refused() {
        let mut ds = mpg();
        transform_column(&mut ds, "MPG_City", &AddConstant(3.0)).unwrap();
        let once = ds.clone();

        let err = transform_column(&mut ds, "MPG_City", &AddConstant(3.0)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TransformAlreadyApplied { ref transform, .. } if transform == "add(3)"
        ));
        assert_eq!(ds, once);
    }

    #[test]
    fn distinct_transforms_compose() {
        let mut ds = mpg();
        transform_column(&mut ds, "MPG_City", &AddConstant(3.0)).unwrap();
        transform_column(&mut ds, "MPG_City", &FnTransform::new("double", |v| v * 2.0)).unwrap();
        assert_eq!(
            ds.numeric_column("MPG_City").unwrap(),
            &[Some(46.0), Some(56.0), None]
        );
    }

    #[test]
    fn lineage_survives_filtering() {
        let mut ds = mpg();
        transform_column(&mut ds, "MPG_City", &AddConstant(3.0)).unwrap();
        let mut subset = ds.head(1);
        assert!(transform_column(&mut subset, "MPG_City", &AddConstant(3.0)).is_err());
    }

    #[test]
    fn transform_rejects_categorical_and_unknown_columns() {
        let mut ds = mpg();
        assert!(matches!(
            transform_column(&mut ds, "Model", &AddConstant(1.0)),
            Err(PipelineError::TypeMismatch { .. })
        ));
        assert!(matches!(
            transform_column(&mut ds, "MPG_Highway", &AddConstant(1.0)),
            Err(PipelineError::ColumnNotFound { .. })
        ));
    }
}
