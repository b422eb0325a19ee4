// cwlogs-archive - CloudWatch Logs to S3 archiver
// Copyright (c) 2025 cwlogs-archive Contributors
// Licensed under the MIT License

//! # cwlogs-archive - CloudWatch Logs to S3
//!
//! Periodically exports every CloudWatch log group of an account to an S3
//! bucket. Each run only covers what was written since the previous run: the
//! end of the last exported window is kept per log group in SSM Parameter
//! Store.
//!
//! ## Overview
//!
//! For every log group, in listing order:
//!
//! 1. the stored watermark is resolved (`0` when the group was never exported)
//! 2. an export task is created for `[watermark, now)` into
//!    `s3://{bucket}/{account_id}/{log group}`
//! 3. `now` is stored as the new watermark once the task has been accepted
//!
//! A log group rejected because too many export tasks are already running is
//! skipped and picked up again by the next run from the same watermark. Any
//! other failure ends the run.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`lambda`] - Lambda runtime entry point
//! - [`core`] - Enumeration, watermark state and export orchestration
//! - [`adapters`] - CloudWatch Logs and SSM behind service traits
//! - [`domain`] - Identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cwlogs_archive::adapters::create_service_clients;
//! use cwlogs_archive::config::load_config;
//! use cwlogs_archive::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // S3_BUCKET and ACCOUNT_ID come from the environment
//!     let config = load_config(None::<&str>)?;
//!     let clients = create_service_clients(&config.aws).await;
//!
//!     let coordinator = ExportCoordinator::new(
//!         &config,
//!         clients.log_service,
//!         clients.parameter_store,
//!     )?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} log groups", summary.exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without AWS
//!
//! [`adapters::memory`] provides in-process stand-ins for both services:
//!
//! ```rust
//! use cwlogs_archive::adapters::memory::{InMemoryLogService, InMemoryParameterStore};
//! use cwlogs_archive::config::ArchiveConfig;
//! use cwlogs_archive::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ArchiveConfig::default();
//! config.export.bucket = Some("archive-bucket".to_string());
//! config.export.account_id = Some("123412341234".to_string());
//!
//! let logs = Arc::new(InMemoryLogService::new(["/aws/lambda/api"]));
//! let store = Arc::new(InMemoryParameterStore::new());
//!
//! let coordinator = ExportCoordinator::new(&config, logs.clone(), store.clone())?;
//! coordinator.execute_export().await?;
//!
//! assert_eq!(logs.submitted().len(), 1);
//! assert!(store.value("/log-exporter-last-export/aws/lambda/api").is_some());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod lambda;
pub mod logging;
