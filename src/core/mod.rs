//! Core business logic.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration and reporting
//! - [`sources`] - Lazy enumeration of log groups
//! - [`state`] - Watermark persistence in the parameter store
//!
//! # Export Workflow
//!
//! For every log group, in listing order:
//!
//! 1. **Resolve**: read the stored watermark, `0` if there is none
//! 2. **Clock**: read the current time once
//! 3. **Submit**: create an export task for `[watermark, now)`
//! 4. **Advance**: store `now` as the new watermark once the task is accepted
//!
//! # Example
//!
//! ```rust,no_run
//! use cwlogs_archive::adapters::create_service_clients;
//! use cwlogs_archive::config::load_config;
//! use cwlogs_archive::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Some("cwlogs-archive.toml"))?;
//! let clients = create_service_clients(&config.aws).await;
//!
//! let coordinator = ExportCoordinator::new(
//!     &config,
//!     clients.log_service,
//!     clients.parameter_store,
//! )?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Exported: {}", summary.exported);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod sources;
pub mod state;
