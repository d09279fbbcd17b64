//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Filters return new datasets (row subsets with the same columns); imputation and column
//! transforms mutate a dataset in place.
//!
//! - [`missing`]: missing-value counts, mean imputation, dropping incomplete rows
//! - [`categorical`]: value counts and membership filters
//! - [`filter()`]: row filtering by predicate, plus threshold filters over numeric columns
//! - [`transform`]: elementwise numeric column transforms
//! - [`reduce()`]: common reductions (count/sum/min/max/mean)
//!
//! ## Example
//!
//! ```rust
//! use tabular_pipeline::processing::{
//!     filter_in, filter_range, impute_mean, transform_column, AddConstant, CompareOp, FilterMode,
//! };
//! use tabular_pipeline::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("Origin", DataType::Utf8),
//!     Field::new("Cylinders", DataType::Float64),
//!     Field::new("Weight", DataType::Float64),
//! ]);
//! let mut ds = DataSet::from_rows(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("Asia".into()), Value::Float64(4.0), Value::Float64(3000.0)],
//!         vec![Value::Utf8("USA".into()), Value::Null, Value::Float64(4500.0)],
//!         vec![Value::Utf8("Europe".into()), Value::Float64(8.0), Value::Float64(5000.0)],
//!     ],
//! )
//! .unwrap();
//!
//! let imputed = impute_mean(&mut ds, "Cylinders").unwrap();
//! assert_eq!(imputed.fill_value, 6.0);
//!
//! let foreign = filter_in(&ds, "Origin", &["Asia", "Europe"]).unwrap();
//! assert_eq!(foreign.row_count(), 2);
//!
//! let heavy = filter_range(&ds, "Weight", CompareOp::Gt, 4000.0, FilterMode::Matching).unwrap();
//! assert_eq!(heavy.row_count(), 2);
//!
//! transform_column(&mut ds, "Weight", &AddConstant(3.0)).unwrap();
//! assert_eq!(ds.numeric_column("Weight").unwrap()[0], Some(3003.0));
//! ```

pub mod categorical;
pub mod filter;
pub mod missing;
pub mod reduce;
pub mod transform;

pub use categorical::{filter_in, filter_not_in, value_counts, ValueCount};
pub use filter::{filter, filter_range, partition_range, CompareOp, FilterMode};
pub use missing::{drop_missing, impute_mean, missing_count, missing_counts, Imputation, MissingCount};
pub use reduce::{reduce, ReduceOp};
pub use transform::{transform_column, AddConstant, ColumnTransform, FnTransform};
