//! External system integrations.
//!
//! - [`traits`] - The [`LogService`] and [`ParameterStore`] boundaries
//! - [`cloudwatch`] - CloudWatch Logs implementation
//! - [`ssm`] - SSM Parameter Store implementation
//! - [`factory`] - Builds both AWS clients from one shared SDK config
//! - [`memory`] - In-process implementations for tests and local runs
//!
//! # Design Pattern
//!
//! Adapters isolate the AWS SDK behind two small traits. The orchestrator
//! only sees domain types and [`crate::domain::ArchiveError`]; SDK errors are
//! mapped at this layer, with the two kinds the orchestrator recovers from
//! (missing parameter, export capacity limit) kept as distinct variants.
//!
//! ```rust,no_run
//! use cwlogs_archive::adapters::create_service_clients;
//! use cwlogs_archive::config::AwsConfig;
//!
//! # async fn example() {
//! let clients = create_service_clients(&AwsConfig::default()).await;
//! let page = clients.log_service.describe_sources(None, None).await;
//! # }
//! ```

pub mod cloudwatch;
pub mod factory;
pub mod memory;
pub mod ssm;
pub mod traits;

pub use factory::{create_service_clients, ServiceClients};
pub use traits::{ExportTaskId, LogService, ParameterStore, SourcePage};
