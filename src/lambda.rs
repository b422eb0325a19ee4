//! Lambda entry point
//!
//! AWS clients are built once per execution environment. Each invocation
//! re-reads the configuration, runs one export and answers with the run's
//! [`ExportSummary`] counters as JSON. Per-log-group outcomes only go to the
//! log. The event payload is ignored, so any schedule or manual trigger works.

use crate::adapters::{create_service_clients, ServiceClients};
use crate::config::{load_config, read_config, ArchiveConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::Result;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;

/// Run the Lambda runtime loop until the runtime API goes away
///
/// # Errors
///
/// Returns an error if the configuration cannot be read at cold start or the
/// runtime loop fails.
pub async fn run(config_path: Option<&str>) -> std::result::Result<(), lambda_runtime::Error> {
    let config_path = config_path.map(str::to_string);

    let cold_start_config = read_config(config_path.as_deref())?;
    let clients = create_service_clients(&cold_start_config.aws).await;

    tracing::info!("Lambda runtime starting");

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let clients = clients.clone();
        let config_path = config_path.clone();
        async move {
            tracing::info!(request_id = %event.context.request_id, "Invocation received");

            let config = load_config(config_path.as_deref())?;
            let response = handle_invocation(&config, &clients).await?;
            Ok::<Value, lambda_runtime::Error>(response)
        }
    }))
    .await
}

/// Run one export and render its summary as the invocation response
///
/// # Errors
///
/// Returns the first unrecovered error of the run; the invocation is then
/// reported as failed.
pub async fn handle_invocation(config: &ArchiveConfig, clients: &ServiceClients) -> Result<Value> {
    let summary = export(config, clients).await?;
    Ok(serde_json::to_value(&summary)?)
}

async fn export(config: &ArchiveConfig, clients: &ServiceClients) -> Result<ExportSummary> {
    let coordinator = ExportCoordinator::new(
        config,
        clients.log_service.clone(),
        clients.parameter_store.clone(),
    )?;

    coordinator.execute_export().await.map_err(|e| {
        tracing::error!(error = %e, "Export run aborted");
        e
    })
}
