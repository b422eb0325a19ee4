//! Configuration schema types
//!
//! Every section has defaults so that a Lambda deployment can run from
//! environment variables alone; only the bucket and account id are required.

use crate::domain::ids::AccountId;
use serde::{Deserialize, Serialize};

/// Default SSM prefix under which watermarks are stored
pub const DEFAULT_PARAMETER_PREFIX: &str = "/log-exporter-last-export/";

/// Main archiver configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// AWS client settings
    #[serde(default)]
    pub aws: AwsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArchiveConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are missing or invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.aws.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination S3 bucket (`S3_BUCKET`)
    #[serde(default)]
    pub bucket: Option<String>,

    /// 12-character AWS account id used as the destination key prefix (`ACCOUNT_ID`)
    #[serde(default)]
    pub account_id: Option<String>,

    /// SSM parameter prefix for watermarks
    #[serde(default = "default_parameter_prefix")]
    pub parameter_prefix: String,

    /// Only export log groups whose names start with this prefix
    #[serde(default)]
    pub source_prefix: Option<String>,

    /// Resolve windows and log them without submitting or writing anything
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            account_id: None,
            parameter_prefix: default_parameter_prefix(),
            source_prefix: None,
            dry_run: false,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        match self.bucket.as_deref() {
            None => return Err("S3 bucket is required (S3_BUCKET)".to_string()),
            Some(bucket) if bucket.trim().is_empty() => {
                return Err("S3 bucket cannot be empty (S3_BUCKET)".to_string())
            }
            Some(_) => {}
        }

        self.account_id()?;

        if !self.parameter_prefix.starts_with('/') {
            return Err(format!(
                "parameter_prefix must start with '/', got '{}'",
                self.parameter_prefix
            ));
        }

        Ok(())
    }

    /// Returns the validated account id
    ///
    /// # Errors
    ///
    /// Returns an error if the account id is missing or not 12 characters long
    pub fn account_id(&self) -> Result<AccountId, String> {
        let raw = self
            .account_id
            .as_deref()
            .ok_or_else(|| "Account id is required (ACCOUNT_ID)".to_string())?;
        AccountId::new(raw)
    }

    /// Returns the destination bucket
    ///
    /// # Errors
    ///
    /// Returns an error if no bucket is configured
    pub fn bucket(&self) -> Result<&str, String> {
        self.bucket
            .as_deref()
            .filter(|bucket| !bucket.trim().is_empty())
            .ok_or_else(|| "S3 bucket is required (S3_BUCKET)".to_string())
    }
}

/// SDK retry strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetryMode {
    /// Standard retries with exponential backoff
    Standard,
    /// Standard retries plus client-side rate limiting
    #[default]
    Adaptive,
}

impl std::str::FromStr for RetryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "adaptive" => Ok(Self::Adaptive),
            _ => Err(format!(
                "Invalid retry mode '{s}'. Must be one of: standard, adaptive"
            )),
        }
    }
}

/// AWS client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region override; the default provider chain is used when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Maximum attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Retry strategy
    #[serde(default)]
    pub retry_mode: RetryMode,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            max_attempts: default_max_attempts(),
            retry_mode: RetryMode::default(),
        }
    }
}

impl AwsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("aws.max_attempts must be greater than 0".to_string());
        }
        if self.max_attempts > 20 {
            return Err("aws.max_attempts cannot exceed 20".to_string());
        }
        Ok(())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable output
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!(
                "Invalid log format '{s}'. Must be one of: json, pretty"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_parameter_prefix() -> String {
    DEFAULT_PARAMETER_PREFIX.to_string()
}

fn default_max_attempts() -> u32 {
    10
}

fn default_local_path() -> String {
    "/var/log/cwlogs-archive".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ArchiveConfig {
        let mut config = ArchiveConfig::default();
        config.export.bucket = Some("archive-bucket".to_string());
        config.export.account_id = Some("123412341234".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = ArchiveConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.parameter_prefix, "/log-exporter-last-export/");
        assert!(!config.export.dry_run);
        assert_eq!(config.aws.max_attempts, 10);
        assert_eq!(config.aws.retry_mode, RetryMode::Adaptive);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_bucket() {
        let mut config = valid_config();
        config.export.bucket = None;
        let err = config.validate().unwrap_err();
        assert!(err.contains("S3_BUCKET"));
    }

    #[test]
    fn test_blank_bucket() {
        let mut config = valid_config();
        config.export.bucket = Some("  ".to_string());
        assert!(config.validate().is_err());
        assert!(config.export.bucket().is_err());
    }

    #[test]
    fn test_missing_account_id() {
        let mut config = valid_config();
        config.export.account_id = None;
        let err = config.validate().unwrap_err();
        assert!(err.contains("ACCOUNT_ID"));
    }

    #[test]
    fn test_short_account_id() {
        let mut config = valid_config();
        config.export.account_id = Some("1".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("12-digit"));
    }

    #[test]
    fn test_relative_parameter_prefix() {
        let mut config = valid_config();
        config.export.parameter_prefix = "log-exporter/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_attempts_bounds() {
        let mut config = valid_config();
        config.aws.max_attempts = 0;
        assert!(config.validate().is_err());
        config.aws.max_attempts = 21;
        assert!(config.validate().is_err());
        config.aws.max_attempts = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = valid_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_mode_from_str() {
        assert_eq!("standard".parse::<RetryMode>().unwrap(), RetryMode::Standard);
        assert_eq!("ADAPTIVE".parse::<RetryMode>().unwrap(), RetryMode::Adaptive);
        assert!("legacy".parse::<RetryMode>().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_deserialize_minimal_toml() {
        let config: ArchiveConfig = toml::from_str(
            r#"
[export]
bucket = "archive-bucket"
account_id = "123412341234"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.aws.retry_mode, RetryMode::Adaptive);
    }
}
