//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::adapters::traits::ExportTaskId;
use crate::core::state::ExportWindow;
use crate::domain::ids::SourceName;
use serde::Serialize;
use std::time::Duration;

/// What happened to one log group during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Export task accepted and watermark advanced
    Exported {
        /// Id of the created export task
        task_id: ExportTaskId,
        /// Exported window
        window: ExportWindow,
    },

    /// Too many export tasks in flight; retried next run from the same watermark
    SkippedLimitExceeded {
        /// Window that was rejected
        window: ExportWindow,
    },

    /// Stored watermark is at or ahead of the clock
    SkippedEmptyWindow {
        /// The empty window
        window: ExportWindow,
    },

    /// Dry run: the export would have been submitted
    Planned {
        /// Window that would be exported
        window: ExportWindow,
    },
}

/// Outcome for one named log group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    /// Log group name
    pub source_name: SourceName,

    /// What happened to it
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

/// Summary of an export run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    /// Number of log groups enumerated
    pub total_sources: usize,

    /// Number of export tasks created
    pub exported: usize,

    /// Number of log groups skipped on the export capacity limit
    pub skipped_limit_exceeded: usize,

    /// Number of log groups skipped because their window was empty
    pub skipped_empty_window: usize,

    /// Number of exports planned in dry-run mode
    pub planned: usize,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// Duration of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,

    /// Per-log-group outcomes, in processing order; logged as they happen,
    /// left out of the serialized form
    #[serde(skip_serializing)]
    pub sources: Vec<SourceReport>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the outcome for a log group
    pub fn record(&mut self, source_name: SourceName, outcome: SourceOutcome) {
        self.total_sources += 1;
        match outcome {
            SourceOutcome::Exported { .. } => self.exported += 1,
            SourceOutcome::SkippedLimitExceeded { .. } => self.skipped_limit_exceeded += 1,
            SourceOutcome::SkippedEmptyWindow { .. } => self.skipped_empty_window += 1,
            SourceOutcome::Planned { .. } => self.planned += 1,
        }
        self.sources.push(SourceReport {
            source_name,
            outcome,
        });
    }

    /// Ids of all export tasks created
    pub fn task_ids(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter_map(|report| match &report.outcome {
                SourceOutcome::Exported { task_id, .. } => Some(task_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check whether every log group was either exported or had nothing to export
    pub fn is_complete(&self) -> bool {
        self.skipped_limit_exceeded == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_sources = self.total_sources,
            exported = self.exported,
            skipped_limit_exceeded = self.skipped_limit_exceeded,
            skipped_empty_window = self.skipped_empty_window,
            planned = self.planned,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export run completed"
        );

        if !self.is_complete() {
            tracing::warn!(
                skipped = self.skipped_limit_exceeded,
                "Some log groups were skipped on the export task limit and will be retried next run"
            );
        }
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
