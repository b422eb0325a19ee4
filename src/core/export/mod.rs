//! Export orchestration
//!
//! This module provides the core export logic, including:
//! - Export request construction
//! - Export coordination and orchestration
//! - Summary and reporting

pub mod coordinator;
pub mod request;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use request::ExportRequest;
pub use summary::{ExportSummary, SourceOutcome, SourceReport};
