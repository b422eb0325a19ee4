//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs, the format CloudWatch ingests from Lambda
//! - Human-readable console output for local runs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cwlogs_archive::logging::init_logging;
//! use cwlogs_archive::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the submission of an export task
///
/// # Example
///
/// ```no_run
/// use cwlogs_archive::log_export_start;
/// use cwlogs_archive::core::state::{ExportWindow, Watermark};
/// use cwlogs_archive::domain::SourceName;
///
/// let source_name = SourceName::new("/aws/lambda/api").unwrap();
/// let window = ExportWindow::new(Watermark::ZERO, Watermark::now());
/// log_export_start!(&source_name, window);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($source_name:expr, $window:expr) => {
        tracing::info!(
            source_name = %$source_name,
            from = $window.from.as_millis(),
            to = $window.to.as_millis(),
            "Exporting log group"
        );
    };
}

/// Log an accepted export task
///
/// # Example
///
/// ```no_run
/// use cwlogs_archive::log_export_submitted;
///
/// log_export_submitted!("/aws/lambda/api", "a1b2c3d4-task");
/// ```
#[macro_export]
macro_rules! log_export_submitted {
    ($source_name:expr, $task_id:expr) => {
        tracing::info!(
            source_name = %$source_name,
            task_id = %$task_id,
            "Export task created"
        );
    };
}

/// Log an error that ended the processing of a log group
///
/// # Example
///
/// ```no_run
/// use cwlogs_archive::log_error_with_context;
/// use cwlogs_archive::domain::ArchiveError;
///
/// let error = ArchiveError::State("Invalid watermark".to_string());
/// log_error_with_context!(&error, "/aws/lambda/api");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $source_name:expr) => {
        tracing::error!(
            error = %$error,
            source_name = %$source_name,
            "Error occurred"
        );
    };
}
