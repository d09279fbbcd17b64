//! `tabular-pipeline` loads a delimited dataset into an in-memory [`types::DataSet`] and runs a
//! short, fixed sequence of clean-up and selection steps over it.
//!
//! The primary entrypoints are [`ingestion::load`], which reads a local file or an HTTP(S) URL,
//! and [`pipeline::TabularPipeline`], which runs every stage and returns each stage's result.
//!
//! ## Loading
//!
//! - Input is delimited text with a header row (`,` by default).
//! - Column types are inferred: a column whose non-missing cells all parse as numbers is
//!   [`types::DataType::Float64`], anything else is [`types::DataType::Utf8`]. Pass a
//!   [`types::Schema`] in [`ingestion::CsvOptions::schema`] to load selected columns with fixed
//!   types instead.
//! - Empty cells and the tokens `NA`, `N/A`, `NaN`, `nan`, `null`, `NULL` are missing values.
//!
//! ```no_run
//! use tabular_pipeline::ingestion::{load, DataSource, LoadOptions};
//!
//! # fn main() -> Result<(), tabular_pipeline::PipelineError> {
//! let source: DataSource = "https://example.com/cars.csv".parse().unwrap();
//! let ds = load(&source, &LoadOptions::default())?;
//! println!("shape={:?}", ds.shape());
//! # Ok(())
//! # }
//! ```
//!
//! ## Stages
//!
//! 1. missing-value counts and mean imputation ([`processing::impute_mean`])
//! 2. value counts and category membership ([`processing::value_counts`],
//!    [`processing::filter_in`])
//! 3. threshold filtering with exact complement ([`processing::partition_range`])
//! 4. in-place elementwise transform ([`processing::transform_column`])
//!
//! ```rust
//! use tabular_pipeline::ingestion::{ingest_csv_from_str, CsvOptions};
//! use tabular_pipeline::pipeline::{PipelineConfig, TabularPipeline};
//!
//! let input = "\
//! Make,Origin,Cylinders,Weight,MPG_City
//! Acura,Asia,4,3000,20
//! BMW,Europe,6,4500,25
//! Buick,USA,,4000,19
//! Audi,Europe,8,5000,18
//! ";
//! let ds = ingest_csv_from_str(input, &CsvOptions::default()).unwrap();
//! let report = TabularPipeline::new(PipelineConfig::default()).run(ds).unwrap();
//!
//! assert_eq!(report.imputation.fill_value, 6.0);
//! assert_eq!(report.categorical_subset.row_count(), 3);
//! assert_eq!(report.range_matching.row_count(), 2);
//! assert_eq!(report.transformed.numeric_column("MPG_City").unwrap()[0], Some(23.0));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: path/URL loading, delimited-text parsing, load observers
//! - [`types`]: schema + columnar dataset types
//! - [`processing`]: imputation, counts, filters, transforms, reductions
//! - [`pipeline`]: the configured stage sequence and its report
//! - [`error`]: the error type shared by everything above

pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{PipelineError, PipelineResult};
