use std::fmt;
use std::sync::Arc;

use log::{error, info, warn};

use crate::error::PipelineError;

use super::unified::DataSource;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed on bad content).
    Error,
    /// Critical error (the source itself could not be read).
    Critical,
}

impl IngestionSeverity {
    /// Severity assigned to a failed load.
    pub fn for_error(e: &PipelineError) -> Self {
        match e {
            PipelineError::SourceUnavailable { .. } => Self::Critical,
            _ => Self::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Where the data was loaded from.
    pub source: DataSource,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of loaded columns.
    pub columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &PipelineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards load events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl IngestionObserver for LogObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        info!(
            "[load][ok] source={} rows={} columns={}",
            ctx.source, stats.rows, stats.columns
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        warn!("[load][{severity:?}] source={} err={error}", ctx.source);
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        error!("[ALERT][load][{severity:?}] source={} err={error}", ctx.source);
    }
}
