//! SSM Parameter Store client
//!
//! Implements [`ParameterStore`] on top of `aws-sdk-ssm`. Watermarks are
//! plain `String` parameters.

use crate::adapters::traits::ParameterStore;
use crate::domain::errors::ParameterStoreError;
use crate::domain::Result;
use async_trait::async_trait;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client;

/// SSM implementation of [`ParameterStore`]
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    /// Wrap an SDK client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_parameter_not_found())
                {
                    ParameterStoreError::NotFound(name.to_string())
                } else {
                    map_sdk_error(err)
                }
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| {
                ParameterStoreError::InvalidResponse(format!(
                    "GetParameter for '{name}' returned no value"
                ))
                .into()
            })
    }

    async fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<()> {
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .overwrite(overwrite)
            .r#type(ParameterType::String)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }

    async fn get_parameters_by_path(&self, path: &str) -> Result<Vec<(String, String)>> {
        let mut parameters = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .get_parameters_by_path()
                .path(path)
                .recursive(true)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(map_sdk_error)?;

            parameters.extend(output.parameters().iter().filter_map(|parameter| {
                Some((
                    parameter.name()?.to_string(),
                    parameter.value()?.to_string(),
                ))
            }));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(parameters)
    }
}

/// Map an SDK error into a [`ParameterStoreError`]
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ParameterStoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            ParameterStoreError::Service {
                code: inner.code().unwrap_or("Unknown").to_string(),
                message: inner.message().unwrap_or_default().to_string(),
            }
        }
        _ => ParameterStoreError::RequestFailed(DisplayErrorContext(&err).to_string()),
    }
}
