//! CloudWatch Logs client
//!
//! Implements [`LogService`] on top of `aws-sdk-cloudwatchlogs`. Retries and
//! throttling are handled by the SDK's retry layer configured in
//! [`crate::adapters::factory`]; this client only maps responses and errors.

use crate::adapters::traits::{ExportTaskId, LogService, SourcePage};
use crate::core::export::request::ExportRequest;
use crate::domain::errors::LogServiceError;
use crate::domain::ids::SourceName;
use crate::domain::Result;
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudwatchlogs::Client;

/// CloudWatch Logs implementation of [`LogService`]
#[derive(Debug, Clone)]
pub struct CloudWatchLogsClient {
    client: Client,
}

impl CloudWatchLogsClient {
    /// Wrap an SDK client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogService for CloudWatchLogsClient {
    async fn describe_sources(
        &self,
        name_prefix: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<SourcePage> {
        let output = self
            .client
            .describe_log_groups()
            .set_log_group_name_prefix(name_prefix.map(str::to_string))
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(map_sdk_error)?;

        let sources = output
            .log_groups()
            .iter()
            .filter_map(|group| group.log_group_name())
            .filter_map(|name| SourceName::new(name).ok())
            .collect();

        Ok(SourcePage {
            sources,
            next_token: output
                .next_token()
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        })
    }

    async fn create_export_task(&self, request: &ExportRequest) -> Result<ExportTaskId> {
        let output = self
            .client
            .create_export_task()
            .log_group_name(request.source_name.as_str())
            .from(request.from.as_millis())
            .to(request.to.as_millis())
            .destination(&request.destination)
            .destination_prefix(&request.destination_prefix)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_limit_exceeded_exception())
                {
                    LogServiceError::LimitExceeded(
                        err.message().unwrap_or("LimitExceededException").to_string(),
                    )
                } else {
                    map_sdk_error(err)
                }
            })?;

        let task_id = output.task_id().ok_or_else(|| {
            LogServiceError::InvalidResponse(format!(
                "CreateExportTask for '{}' returned no taskId",
                request.source_name
            ))
        })?;

        Ok(task_id.to_string())
    }
}

/// Map an SDK error into a [`LogServiceError`]
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> LogServiceError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            LogServiceError::Service {
                code: inner.code().unwrap_or("Unknown").to_string(),
                message: inner.message().unwrap_or_default().to_string(),
            }
        }
        _ => LogServiceError::RequestFailed(DisplayErrorContext(&err).to_string()),
    }
}
