//! The fixed analysis sequence: load → impute → count/filter → transform.
//!
//! [`TabularPipeline::run`] threads one [`DataSet`] through every stage and returns each stage's
//! result in a [`PipelineReport`]; nothing is printed here.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::{load, DataSource, LoadOptions};
use crate::processing::{
    filter_in, impute_mean, missing_counts, partition_range, transform_column, value_counts, AddConstant,
    CompareOp, Imputation, MissingCount, ValueCount,
};
use crate::types::DataSet;

/// Which columns, values and thresholds each stage uses.
///
/// Defaults reproduce the cars analysis. Missing keys in a JSON config fall back to these
/// defaults; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Numeric column whose missing values are replaced by the column mean.
    pub impute_column: String,
    /// Columns to report value counts for.
    pub count_columns: Vec<String>,
    /// Categorical column for the membership filter.
    pub category_column: String,
    /// Values kept by the membership filter.
    pub allowed_categories: Vec<String>,
    /// Numeric column for the threshold filter.
    pub range_column: String,
    pub range_op: CompareOp,
    pub range_threshold: f64,
    /// Numeric column that receives `+ add_constant`.
    pub transform_column: String,
    pub add_constant: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            impute_column: "Cylinders".to_string(),
            count_columns: vec!["Make".to_string(), "Origin".to_string()],
            category_column: "Origin".to_string(),
            allowed_categories: vec!["Asia".to_string(), "Europe".to_string()],
            range_column: "Weight".to_string(),
            range_op: CompareOp::Gt,
            range_threshold: 4000.0,
            transform_column: "MPG_City".to_string(),
            add_constant: 3.0,
        }
    }
}

impl PipelineConfig {
    /// Decode a config from JSON text.
    pub fn from_json_str(input: &str) -> PipelineResult<Self> {
        serde_json::from_str(input).map_err(|e| PipelineError::Config {
            message: e.to_string(),
        })
    }

    /// Read and decode a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PipelineError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }
}

/// Value counts for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCounts {
    pub column: String,
    pub counts: Vec<ValueCount>,
}

/// Result of every stage of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// `(rows, columns)` of the loaded dataset.
    pub shape: (usize, usize),
    pub missing_before: Vec<MissingCount>,
    pub imputation: Imputation,
    pub missing_after: Vec<MissingCount>,
    pub value_counts: Vec<ColumnCounts>,
    /// Rows whose category is in the allowed set.
    pub categorical_subset: DataSet,
    /// Rows satisfying the threshold comparison.
    pub range_matching: DataSet,
    /// Rows not satisfying it.
    pub range_complement: DataSet,
    /// The imputed dataset after the column transform.
    pub transformed: DataSet,
}

/// Scalar parts of a [`PipelineReport`], for machine-readable output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_before: Vec<MissingCount>,
    pub imputation: Imputation,
    pub missing_after: Vec<MissingCount>,
    pub value_counts: Vec<ColumnCounts>,
    pub categorical_subset_rows: usize,
    pub range_matching_rows: usize,
    pub range_complement_rows: usize,
    pub transformed_column: String,
    pub applied_transforms: Vec<String>,
}

impl PipelineReport {
    pub fn summary(&self, config: &PipelineConfig) -> PipelineSummary {
        PipelineSummary {
            rows: self.shape.0,
            columns: self.shape.1,
            missing_before: self.missing_before.clone(),
            imputation: self.imputation.clone(),
            missing_after: self.missing_after.clone(),
            value_counts: self.value_counts.clone(),
            categorical_subset_rows: self.categorical_subset.row_count(),
            range_matching_rows: self.range_matching.row_count(),
            range_complement_rows: self.range_complement.row_count(),
            transformed_column: config.transform_column.clone(),
            applied_transforms: self
                .transformed
                .applied_transforms(&config.transform_column)
                .to_vec(),
        }
    }
}

/// Runs the configured stages over a dataset.
#[derive(Debug, Clone, Default)]
pub struct TabularPipeline {
    config: PipelineConfig,
}

impl TabularPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load `source` and run every stage on it.
    pub fn run_from_source(&self, source: &DataSource, options: &LoadOptions) -> PipelineResult<PipelineReport> {
        let dataset = load(source, options)?;
        self.run(dataset)
    }

    /// Run every stage on `dataset`. The first failing stage aborts the run.
    pub fn run(&self, mut dataset: DataSet) -> PipelineResult<PipelineReport> {
        let cfg = &self.config;
        let shape = dataset.shape();
        info!("dataset shape: {} rows x {} columns", shape.0, shape.1);

        let missing_before = missing_counts(&dataset);
        let imputation = impute_mean(&mut dataset, &cfg.impute_column)?;
        info!(
            "imputed {} missing '{}' values with mean {}",
            imputation.missing_before, imputation.column, imputation.fill_value
        );
        let missing_after = missing_counts(&dataset);

        let column_counts = cfg
            .count_columns
            .iter()
            .map(|column| {
                Ok(ColumnCounts {
                    column: column.clone(),
                    counts: value_counts(&dataset, column)?,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        let categorical_subset = filter_in(&dataset, &cfg.category_column, cfg.allowed_categories.as_slice())?;
        info!(
            "{} rows with '{}' in {:?}",
            categorical_subset.row_count(),
            cfg.category_column,
            cfg.allowed_categories
        );

        let (range_matching, range_complement) =
            partition_range(&dataset, &cfg.range_column, cfg.range_op, cfg.range_threshold)?;
        info!(
            "'{}' {} {}: {} matching, {} not",
            cfg.range_column,
            cfg.range_op,
            cfg.range_threshold,
            range_matching.row_count(),
            range_complement.row_count()
        );

        transform_column(&mut dataset, &cfg.transform_column, &AddConstant(cfg.add_constant))?;
        info!("added {} to '{}'", cfg.add_constant, cfg.transform_column);

        Ok(PipelineReport {
            shape,
            missing_before,
            imputation,
            missing_after,
            value_counts: column_counts,
            categorical_subset,
            range_matching,
            range_complement,
            transformed: dataset,
        })
    }
}
