use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use tabular_pipeline::ingestion::{CsvOptions, DataSource, LoadOptions, LogObserver};
use tabular_pipeline::pipeline::{PipelineConfig, PipelineReport, TabularPipeline};
use tabular_pipeline::types::DataSet;

#[derive(Parser)]
#[command(
    name = "tabular-pipeline",
    about = "Load a delimited dataset, impute, count, filter and transform it"
)]
struct Cli {
    /// Local path or http(s) URL of the delimited input (must have a header row)
    source: String,

    /// Path to a JSON pipeline configuration. Defaults to the cars analysis.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Number of rows shown per result table
    #[arg(long, default_value_t = 5)]
    head: usize,

    /// Timeout in seconds for URL sources
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print a JSON summary instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // RUST_LOG=debug shows per-stage details.
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_path(path)?,
        None => PipelineConfig::default(),
    };

    anyhow::ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, got {:?}",
        cli.delimiter
    );
    let options = LoadOptions {
        csv: CsvOptions {
            delimiter: cli.delimiter as u8,
            ..Default::default()
        },
        http_timeout: Duration::from_secs(cli.timeout_secs),
        observer: Some(Arc::new(LogObserver)),
        ..Default::default()
    };

    let source: DataSource = cli.source.parse().unwrap_or_else(|never| match never {});
    let pipeline = TabularPipeline::new(config);
    let report = pipeline
        .run_from_source(&source, &options)
        .with_context(|| format!("pipeline failed for {source}"))?;

    if cli.json {
        let summary = report.summary(pipeline.config());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&report, pipeline.config(), cli.head);
    }
    Ok(())
}

fn print_report(report: &PipelineReport, config: &PipelineConfig, head: usize) {
    println!("shape: {} rows x {} columns", report.shape.0, report.shape.1);

    section("missing values before imputation");
    for m in &report.missing_before {
        println!("{:<20} {}", m.column, m.missing);
    }

    section(&format!(
        "'{}' imputed with mean {} ({} values)",
        report.imputation.column, report.imputation.fill_value, report.imputation.missing_before
    ));
    for m in &report.missing_after {
        println!("{:<20} {}", m.column, m.missing);
    }

    for counts in &report.value_counts {
        section(&format!("value counts: {}", counts.column));
        for c in &counts.counts {
            println!("{:<20} {}", c.value.to_string(), c.count);
        }
    }

    section(&format!(
        "{} in {:?}",
        config.category_column, config.allowed_categories
    ));
    print_head(&report.categorical_subset, head);

    section(&format!(
        "{} {} {}",
        config.range_column, config.range_op, config.range_threshold
    ));
    print_head(&report.range_matching, head);

    section(&format!(
        "not ({} {} {})",
        config.range_column, config.range_op, config.range_threshold
    ));
    print_head(&report.range_complement, head);

    section(&format!(
        "{} + {}",
        config.transform_column, config.add_constant
    ));
    print_head(&report.transformed, head);
}

fn section(title: &str) {
    println!("\n== {title}");
}

fn print_head(ds: &DataSet, n: usize) {
    println!("{}", ds.head(n));
    if ds.row_count() > n {
        println!("({} of {} rows shown)", n, ds.row_count());
    }
}
