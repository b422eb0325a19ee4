//! Domain error types
//!
//! This module defines the error hierarchy for the archiver.
//! All errors are domain-specific and don't expose AWS SDK types.

use thiserror::Error;

/// Main archiver error type
///
/// This is the primary error type used throughout the application.
/// It wraps the service-specific error types and adds export context.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Configuration-related errors (missing or invalid bucket, account id, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CloudWatch Logs errors
    #[error("Log service error: {0}")]
    LogService(#[from] LogServiceError),

    /// SSM Parameter Store errors
    #[error("Parameter store error: {0}")]
    ParameterStore(#[from] ParameterStoreError),

    /// Export submission failed for a specific log group
    #[error("Export of '{source_name}' failed: {reason}")]
    ExportFailed {
        /// Log group whose export was rejected
        source_name: String,
        /// Underlying service error
        #[source]
        reason: LogServiceError,
    },

    /// Stored watermark state is unusable
    #[error("State management error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CloudWatch Logs errors
///
/// The capacity-limit case is kept separate because the orchestrator
/// recovers from it locally.
#[derive(Debug, Error)]
pub enum LogServiceError {
    /// Too many export tasks are running concurrently for the account
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// The service rejected the request
    #[error("Service error: {code} - {message}")]
    Service { code: String, message: String },

    /// The request never produced a service response (dispatch, timeout, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service responded without a field we depend on
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// SSM Parameter Store errors
#[derive(Debug, Error)]
pub enum ParameterStoreError {
    /// The parameter does not exist
    #[error("Parameter not found: {0}")]
    NotFound(String),

    /// The service rejected the request
    #[error("Service error: {code} - {message}")]
    Service { code: String, message: String },

    /// The request never produced a service response
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service responded without a field we depend on
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ArchiveError {
    /// True if this is the capacity-limit rejection of an export submission
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            ArchiveError::LogService(LogServiceError::LimitExceeded(_))
        )
    }

    /// True if a parameter lookup failed only because the key is absent
    pub fn is_parameter_not_found(&self) -> bool {
        matches!(
            self,
            ArchiveError::ParameterStore(ParameterStoreError::NotFound(_))
        )
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Serialization(err.to_string())
    }
}
