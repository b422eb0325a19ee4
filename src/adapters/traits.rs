//! Service abstraction traits
//!
//! This module defines the two external boundaries the archiver talks to:
//! the log service that lists log groups and accepts export tasks, and the
//! parameter store that holds watermarks.

use crate::core::export::request::ExportRequest;
use crate::domain::ids::SourceName;
use crate::domain::Result;
use async_trait::async_trait;

/// One page of a log group listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePage {
    /// Log group names on this page, in service order
    pub sources: Vec<SourceName>,

    /// Continuation token for the next page, `None` on the last page
    pub next_token: Option<String>,
}

/// Identifier of an accepted export task
pub type ExportTaskId = String;

/// Log service client trait
///
/// Implementations map service failures into [`crate::domain::LogServiceError`]
/// and must report "too many running export tasks" as
/// `LogServiceError::LimitExceeded`.
#[async_trait]
pub trait LogService: Send + Sync {
    /// Fetch one page of log groups
    ///
    /// # Arguments
    ///
    /// * `name_prefix` - Only list log groups whose names start with this prefix
    /// * `next_token` - Continuation token from the previous page, `None` for the first
    ///
    /// # Errors
    ///
    /// Returns an error if the listing call fails.
    async fn describe_sources(
        &self,
        name_prefix: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<SourcePage>;

    /// Submit an export task
    ///
    /// # Returns
    ///
    /// Returns the id of the accepted task.
    ///
    /// # Errors
    ///
    /// Returns `LogServiceError::LimitExceeded` when too many export tasks
    /// are in flight, or another error kind for any other failure.
    async fn create_export_task(&self, request: &ExportRequest) -> Result<ExportTaskId>;
}

/// Parameter store client trait for watermark persistence
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Read a parameter value
    ///
    /// # Errors
    ///
    /// Returns `ParameterStoreError::NotFound` if the parameter does not
    /// exist, or another error kind if the lookup fails.
    async fn get_parameter(&self, name: &str) -> Result<String>;

    /// Write a parameter value
    ///
    /// # Arguments
    ///
    /// * `name` - Parameter name
    /// * `value` - Value to store
    /// * `overwrite` - Replace an existing value instead of failing
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<()>;

    /// List all parameters below a path, recursively
    ///
    /// # Returns
    ///
    /// `(name, value)` pairs for every parameter under `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of the listing fails.
    async fn get_parameters_by_path(&self, path: &str) -> Result<Vec<(String, String)>>;
}
