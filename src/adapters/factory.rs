//! AWS client factory
//!
//! Builds both service clients from one shared SDK configuration so they
//! resolve credentials and region once and use the same retry policy.

use crate::adapters::cloudwatch::CloudWatchLogsClient;
use crate::adapters::ssm::SsmParameterStore;
use crate::adapters::traits::{LogService, ParameterStore};
use crate::config::schema::{AwsConfig, RetryMode};
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_ssm::config::Region;
use std::sync::Arc;

/// Handles to the two external services
#[derive(Clone)]
pub struct ServiceClients {
    /// CloudWatch Logs
    pub log_service: Arc<dyn LogService>,

    /// SSM Parameter Store
    pub parameter_store: Arc<dyn ParameterStore>,
}

/// Create the CloudWatch Logs and SSM clients
///
/// Credentials come from the default provider chain (the execution role
/// inside Lambda).
pub async fn create_service_clients(config: &AwsConfig) -> ServiceClients {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(retry_config(config));
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    let sdk_config = loader.load().await;

    tracing::info!(
        region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
        max_attempts = config.max_attempts,
        retry_mode = ?config.retry_mode,
        "Creating AWS clients"
    );

    ServiceClients {
        log_service: Arc::new(CloudWatchLogsClient::new(
            aws_sdk_cloudwatchlogs::Client::new(&sdk_config),
        )),
        parameter_store: Arc::new(SsmParameterStore::new(aws_sdk_ssm::Client::new(
            &sdk_config,
        ))),
    }
}

fn retry_config(config: &AwsConfig) -> RetryConfig {
    let base = match config.retry_mode {
        RetryMode::Standard => RetryConfig::standard(),
        RetryMode::Adaptive => RetryConfig::adaptive(),
    };
    base.with_max_attempts(config.max_attempts)
}
