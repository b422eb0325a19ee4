//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which resolves the
//! configuration exactly as an export run would and reports the result.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("environment only");
        tracing::info!(config_source = %source, "Validating configuration");

        println!("Validating configuration: {source}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bucket: {}", config.export.bucket.as_deref().unwrap_or(""));
        println!(
            "  Account ID: {}",
            config.export.account_id.as_deref().unwrap_or("")
        );
        println!("  Parameter Prefix: {}", config.export.parameter_prefix);
        println!(
            "  Source Prefix: {}",
            config.export.source_prefix.as_deref().unwrap_or("(all log groups)")
        );
        println!("  Dry Run: {}", config.export.dry_run);
        println!(
            "  AWS Region: {}",
            config.aws.region.as_deref().unwrap_or("(default provider chain)")
        );
        println!(
            "  Retries: {:?}, max {} attempts",
            config.aws.retry_mode, config.aws.max_attempts
        );
        println!("  Log Format: {:?}", config.logging.format);
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_invalid_file_returns_configuration_code() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[export]\nparameter_prefix = \"relative/\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_file_returns_configuration_code() {
        let code = ValidateArgs {}
            .execute(Some("/nonexistent/cwlogs-archive.toml"))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
