//! Export coordinator - main orchestrator for the export process
//!
//! Drives every log group through the same four steps, strictly one after
//! another: resolve the stored watermark, read the clock, submit the export
//! task, advance the watermark.

use crate::adapters::traits::{LogService, ParameterStore};
use crate::config::ArchiveConfig;
use crate::core::export::request::ExportRequest;
use crate::core::export::summary::{ExportSummary, SourceOutcome};
use crate::core::sources::SourceEnumerator;
use crate::core::state::{ExportWindow, StateManager, Watermark};
use crate::domain::errors::{ArchiveError, LogServiceError};
use crate::domain::ids::{AccountId, SourceName};
use crate::domain::Result;
use futures::TryStreamExt;
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    log_service: Arc<dyn LogService>,
    state_manager: StateManager,
    enumerator: SourceEnumerator,
    bucket: String,
    account_id: AccountId,
    dry_run: bool,
    clock: fn() -> Watermark,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Configuration`] if the configuration is
    /// invalid, most notably when the bucket is missing or the account id is
    /// not 12 characters long. Nothing is listed or submitted in that case.
    pub fn new(
        config: &ArchiveConfig,
        log_service: Arc<dyn LogService>,
        parameter_store: Arc<dyn ParameterStore>,
    ) -> Result<Self> {
        config.validate().map_err(ArchiveError::Configuration)?;

        let export = &config.export;
        let bucket = export
            .bucket()
            .map_err(ArchiveError::Configuration)?
            .to_string();
        let account_id = export.account_id().map_err(ArchiveError::Configuration)?;

        tracing::info!(
            bucket = %bucket,
            account_id = %account_id,
            parameter_prefix = %export.parameter_prefix,
            source_prefix = export.source_prefix.as_deref().unwrap_or(""),
            dry_run = export.dry_run,
            "Export coordinator configured"
        );

        Ok(Self {
            enumerator: SourceEnumerator::new(log_service.clone(), export.source_prefix.clone()),
            state_manager: StateManager::new(parameter_store, export.parameter_prefix.clone()),
            log_service,
            bucket,
            account_id,
            dry_run: export.dry_run,
            clock: Watermark::now,
        })
    }

    /// Replace the wall clock
    pub fn with_clock(mut self, clock: fn() -> Watermark) -> Self {
        self.clock = clock;
        self
    }

    /// The current time, read once per log group
    pub fn current_time(&self) -> Watermark {
        (self.clock)()
    }

    /// The state manager holding the watermarks
    pub fn state_manager(&self) -> &StateManager {
        &self.state_manager
    }

    /// Execute the export
    ///
    /// Enumerates every log group and processes each in listing order.
    ///
    /// # Errors
    ///
    /// Stops at the first error other than the export capacity limit.
    /// Watermarks already advanced for earlier log groups stay in place.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.dry_run;

        tracing::info!(dry_run = self.dry_run, "Starting export run");

        let mut sources = std::pin::pin!(self.enumerator.sources());
        while let Some(source_name) = sources.try_next().await? {
            let outcome = self.process_source(&source_name).await?;
            summary.record(source_name, outcome);
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Process a single log group
    pub async fn process_source(&self, source_name: &SourceName) -> Result<SourceOutcome> {
        let from = self
            .state_manager
            .resolve_watermark(source_name.as_str())
            .await
            .inspect_err(|e| {
                crate::log_error_with_context!(e, source_name);
            })?;
        let to = self.current_time();
        let window = ExportWindow::new(from, to);

        if window.is_empty() {
            tracing::warn!(
                source_name = %source_name,
                from = from.as_millis(),
                to = to.as_millis(),
                "Stored watermark is not behind the clock, skipping"
            );
            return Ok(SourceOutcome::SkippedEmptyWindow { window });
        }

        if self.dry_run {
            let request =
                ExportRequest::new(source_name.clone(), window, &self.bucket, &self.account_id);
            tracing::info!(
                source_name = %source_name,
                from = from.as_millis(),
                to = to.as_millis(),
                destination = %request.destination,
                destination_prefix = %request.destination_prefix,
                "Dry run: export not submitted"
            );
            return Ok(SourceOutcome::Planned { window });
        }

        self.submit_export(source_name, window).await
    }

    /// Submit one export task and advance the watermark if it was accepted
    ///
    /// # Errors
    ///
    /// A capacity-limit rejection is not an error: the log group is skipped
    /// and keeps its watermark. Any other rejection becomes
    /// [`ArchiveError::ExportFailed`]. A failed watermark write after an
    /// accepted submit is returned as is; the task stays submitted.
    pub async fn submit_export(
        &self,
        source_name: &SourceName,
        window: ExportWindow,
    ) -> Result<SourceOutcome> {
        let request =
            ExportRequest::new(source_name.clone(), window, &self.bucket, &self.account_id);

        crate::log_export_start!(source_name, window);

        match self.log_service.create_export_task(&request).await {
            Ok(task_id) => {
                crate::log_export_submitted!(source_name, task_id);
                self.state_manager
                    .advance_watermark(source_name.as_str(), window.to)
                    .await
                    .inspect_err(|e| {
                        tracing::error!(
                            source_name = %source_name,
                            task_id = %task_id,
                            error = %e,
                            "Export task created but watermark not advanced; the window will be exported again"
                        );
                    })?;
                Ok(SourceOutcome::Exported { task_id, window })
            }
            Err(ArchiveError::LogService(LogServiceError::LimitExceeded(message))) => {
                tracing::warn!(
                    source_name = %source_name,
                    reason = %message,
                    "Too many concurrently running export tasks, skipping until next run"
                );
                Ok(SourceOutcome::SkippedLimitExceeded { window })
            }
            Err(ArchiveError::LogService(reason)) => {
                crate::log_error_with_context!(&reason, source_name);
                Err(ArchiveError::ExportFailed {
                    source_name: source_name.to_string(),
                    reason,
                })
            }
            Err(other) => {
                crate::log_error_with_context!(&other, source_name);
                Err(other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryLogService, InMemoryParameterStore};

    const NOW: i64 = 1_642_568_042_037;

    fn fixed_clock() -> Watermark {
        Watermark::from_millis(NOW)
    }

    fn config() -> ArchiveConfig {
        let mut config = ArchiveConfig::default();
        config.export.bucket = Some("mybucket2".to_string());
        config.export.account_id = Some("123412341234".to_string());
        config
    }

    fn coordinator(
        config: &ArchiveConfig,
        service: &Arc<InMemoryLogService>,
        store: &Arc<InMemoryParameterStore>,
    ) -> ExportCoordinator {
        ExportCoordinator::new(config, service.clone(), store.clone())
            .unwrap()
            .with_clock(fixed_clock)
    }

    fn name(value: &str) -> SourceName {
        SourceName::new(value).unwrap()
    }

    #[test]
    fn test_new_rejects_short_account_id() {
        let mut config = config();
        config.export.account_id = Some("1".to_string());
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new());

        let result = ExportCoordinator::new(&config, service.clone(), store);
        assert!(matches!(result, Err(ArchiveError::Configuration(_))));
        assert_eq!(service.describe_calls(), 0);
    }

    #[test]
    fn test_new_requires_bucket() {
        let mut config = config();
        config.export.bucket = None;
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new());

        let result = ExportCoordinator::new(&config, service, store);
        assert!(matches!(result, Err(ArchiveError::Configuration(_))));
    }

    #[test]
    fn test_current_time_uses_clock() {
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new());
        let coordinator = coordinator(&config(), &service, &store);
        assert_eq!(coordinator.current_time(), Watermark::from_millis(NOW));
    }

    #[tokio::test]
    async fn test_submit_export_advances_watermark() {
        let service = Arc::new(InMemoryLogService::new(["mock_my_log_group_name"]));
        let store = Arc::new(InMemoryParameterStore::new());
        let coordinator = coordinator(&config(), &service, &store);
        let window = ExportWindow::new(Watermark::ZERO, Watermark::from_millis(NOW));

        let outcome = coordinator
            .submit_export(&name("mock_my_log_group_name"), window)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SourceOutcome::Exported {
                task_id: "task-1".to_string(),
                window
            }
        );
        let submitted = service.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].destination, "mybucket2");
        assert_eq!(
            submitted[0].destination_prefix,
            "123412341234/mock_my_log_group_name"
        );
        assert_eq!(
            store
                .value("/log-exporter-last-export/mock_my_log_group_name")
                .as_deref(),
            Some("1642568042037")
        );
    }

    #[tokio::test]
    async fn test_submit_export_limit_exceeded_keeps_watermark() {
        let service = Arc::new(InMemoryLogService::new(["busy"]).with_limit_exceeded("busy"));
        let store = Arc::new(
            InMemoryParameterStore::new().with_parameter("/log-exporter-last-export/busy", "10"),
        );
        let coordinator = coordinator(&config(), &service, &store);
        let window = ExportWindow::new(Watermark::from_millis(10), Watermark::from_millis(NOW));

        let outcome = coordinator
            .submit_export(&name("busy"), window)
            .await
            .unwrap();

        assert_eq!(outcome, SourceOutcome::SkippedLimitExceeded { window });
        assert_eq!(store.put_calls(), 0);
        assert_eq!(
            store.value("/log-exporter-last-export/busy").as_deref(),
            Some("10")
        );
    }

    #[tokio::test]
    async fn test_submit_export_other_error_fails() {
        let service = Arc::new(InMemoryLogService::new(["broken"]).with_failure("broken"));
        let store = Arc::new(InMemoryParameterStore::new());
        let coordinator = coordinator(&config(), &service, &store);
        let window = ExportWindow::new(Watermark::ZERO, Watermark::from_millis(NOW));

        let err = coordinator
            .submit_export(&name("broken"), window)
            .await
            .unwrap_err();

        match err {
            ArchiveError::ExportFailed {
                source_name,
                reason,
            } => {
                assert_eq!(source_name, "broken");
                assert!(matches!(reason, LogServiceError::Service { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_export_write_failure_after_submit() {
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new().with_failing_writes());
        let coordinator = coordinator(&config(), &service, &store);
        let window = ExportWindow::new(Watermark::ZERO, Watermark::from_millis(NOW));

        let err = coordinator
            .submit_export(&name("first"), window)
            .await
            .unwrap_err();

        assert!(matches!(err, ArchiveError::ParameterStore(_)));
        assert_eq!(service.submitted().len(), 1);
        assert!(store.value("/log-exporter-last-export/first").is_none());
    }

    #[tokio::test]
    async fn test_process_source_empty_window() {
        let service = Arc::new(InMemoryLogService::new(["ahead"]));
        let store = Arc::new(InMemoryParameterStore::new().with_parameter(
            "/log-exporter-last-export/ahead",
            &(NOW + 60_000).to_string(),
        ));
        let coordinator = coordinator(&config(), &service, &store);

        let outcome = coordinator.process_source(&name("ahead")).await.unwrap();

        assert!(matches!(outcome, SourceOutcome::SkippedEmptyWindow { .. }));
        assert!(service.submitted().is_empty());
        assert_eq!(store.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_process_source_dry_run() {
        let mut config = config();
        config.export.dry_run = true;
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new());
        let coordinator = coordinator(&config, &service, &store);

        let outcome = coordinator.process_source(&name("first")).await.unwrap();

        assert_eq!(
            outcome,
            SourceOutcome::Planned {
                window: ExportWindow::new(Watermark::ZERO, Watermark::from_millis(NOW))
            }
        );
        assert!(service.submitted().is_empty());
        assert_eq!(store.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_process_source_state_error_propagates() {
        let service = Arc::new(InMemoryLogService::new(["first"]));
        let store = Arc::new(InMemoryParameterStore::new().with_failing_reads());
        let coordinator = coordinator(&config(), &service, &store);

        let err = coordinator
            .process_source(&name("first"))
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::ParameterStore(_)));
        assert!(service.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_execute_export_records_every_source() {
        let service = Arc::new(InMemoryLogService::new(["first", "second", "third"]));
        let store = Arc::new(InMemoryParameterStore::new());
        let coordinator = coordinator(&config(), &service, &store);

        let summary = coordinator.execute_export().await.unwrap();

        assert_eq!(summary.total_sources, 3);
        assert_eq!(summary.exported, 3);
        assert_eq!(summary.task_ids(), vec!["task-1", "task-2", "task-3"]);
        assert!(!summary.dry_run);
    }
}
