//! Export command implementation
//!
//! This module implements the `export` command, a single export run from
//! the command line.

use crate::adapters::create_service_clients;
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportSummary, SourceOutcome};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Dry run mode - resolve windows without submitting exports or writing watermarks
    #[arg(long)]
    pub dry_run: bool,

    /// Only export log groups whose names start with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub source_prefix: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if let Some(prefix) = &self.source_prefix {
            tracing::info!(source_prefix = %prefix, "Overriding source prefix from CLI");
            config.export.source_prefix = Some(prefix.clone());
        }

        if config.export.dry_run {
            println!("DRY RUN MODE - no export tasks are created and no watermarks are written");
            println!();
        }

        let clients = create_service_clients(&config.aws).await;

        let coordinator = match ExportCoordinator::new(
            &config,
            clients.log_service,
            clients.parameter_store,
        ) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);

        Ok(0)
    }
}

fn print_summary(summary: &ExportSummary) {
    println!("Export Summary:");
    println!("  Log groups: {}", summary.total_sources);
    println!("  Exported: {}", summary.exported);
    println!("  Skipped (export limit): {}", summary.skipped_limit_exceeded);
    println!("  Skipped (empty window): {}", summary.skipped_empty_window);
    if summary.dry_run {
        println!("  Planned: {}", summary.planned);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for report in &summary.sources {
        match &report.outcome {
            SourceOutcome::Exported { task_id, window } => println!(
                "  {} [{}, {}) task {}",
                report.source_name, window.from, window.to, task_id
            ),
            SourceOutcome::Planned { window } => println!(
                "  {} [{}, {}) planned",
                report.source_name, window.from, window.to
            ),
            SourceOutcome::SkippedLimitExceeded { .. } => {
                println!("  {} skipped: export limit reached", report.source_name)
            }
            SourceOutcome::SkippedEmptyWindow { .. } => {
                println!("  {} skipped: nothing new", report.source_name)
            }
        }
    }

    if !summary.is_complete() {
        println!();
        println!("Some log groups hit the export task limit and will be retried on the next run.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs {
            dry_run: false,
            source_prefix: None,
        };

        assert!(!args.dry_run);
        assert!(args.source_prefix.is_none());
    }

    #[tokio::test]
    async fn test_missing_config_file_is_configuration_error() {
        let args = ExportArgs {
            dry_run: true,
            source_prefix: None,
        };
        let code = args
            .execute(Some("/nonexistent/cwlogs-archive.toml"))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
