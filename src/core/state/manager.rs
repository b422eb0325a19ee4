//! State manager for watermark persistence
//!
//! This module provides the StateManager for resolving and advancing
//! watermarks in the parameter store.

use crate::adapters::traits::ParameterStore;
use crate::core::state::key::parameter_name;
use crate::core::state::watermark::Watermark;
use crate::domain::errors::ArchiveError;
use crate::domain::Result;
use std::sync::Arc;

/// A watermark as found in the parameter store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWatermark {
    /// Full parameter name
    pub parameter_name: String,

    /// Parameter name with the configured prefix removed
    pub source_key: String,

    /// Parsed value, `None` if the stored value is not a number
    pub watermark: Option<Watermark>,

    /// Raw stored value
    pub raw_value: String,
}

/// State manager for watermark persistence
///
/// Holds the parameter store handle and the fixed parameter prefix.
pub struct StateManager {
    store: Arc<dyn ParameterStore>,
    prefix: String,
}

impl StateManager {
    /// Create a new StateManager
    ///
    /// # Arguments
    ///
    /// * `store` - Parameter store backend
    /// * `prefix` - Prefix prepended to every log group name
    pub fn new(store: Arc<dyn ParameterStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// The parameter prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parameter name holding the watermark of `source_name`
    pub fn parameter_name(&self, source_name: &str) -> String {
        parameter_name(&self.prefix, source_name)
    }

    /// Resolve the watermark of a log group
    ///
    /// # Returns
    ///
    /// The stored watermark, or [`Watermark::ZERO`] if none has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for any reason other than a
    /// missing parameter, or if the stored value is not a number.
    pub async fn resolve_watermark(&self, source_name: &str) -> Result<Watermark> {
        let name = self.parameter_name(source_name);

        match self.store.get_parameter(&name).await {
            Ok(value) => value.parse().map_err(|e| {
                ArchiveError::State(format!("Parameter '{name}' holds an unusable value: {e}"))
            }),
            Err(e) if e.is_parameter_not_found() => {
                tracing::warn!(
                    parameter_name = %name,
                    "Parameter was not found. Setting last export time to '0'"
                );
                Ok(Watermark::ZERO)
            }
            Err(e) => Err(e),
        }
    }

    /// Advance the watermark of a log group
    ///
    /// Unconditionally overwrites whatever is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn advance_watermark(&self, source_name: &str, watermark: Watermark) -> Result<()> {
        let name = self.parameter_name(source_name);

        tracing::debug!(
            parameter_name = %name,
            watermark = watermark.as_millis(),
            "Advancing watermark"
        );

        self.store
            .put_parameter(&name, &watermark.to_string(), true)
            .await
    }

    /// List every watermark stored under the prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    pub async fn list_watermarks(&self) -> Result<Vec<StoredWatermark>> {
        // Hierarchy paths are given without the trailing separator
        let path = match self.prefix.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let parameters = self.store.get_parameters_by_path(path).await?;

        let mut watermarks: Vec<StoredWatermark> = parameters
            .into_iter()
            .map(|(parameter_name, raw_value)| {
                let source_key = parameter_name
                    .strip_prefix(self.prefix.as_str())
                    .unwrap_or(&parameter_name)
                    .to_string();
                StoredWatermark {
                    watermark: raw_value.parse().ok(),
                    parameter_name,
                    source_key,
                    raw_value,
                }
            })
            .collect();
        watermarks.sort_by(|a, b| a.parameter_name.cmp(&b.parameter_name));

        Ok(watermarks)
    }
}
