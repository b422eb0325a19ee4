//! Configuration loader with TOML parsing and environment variable overrides
//!
//! A Lambda deployment normally has no file at all: every setting comes from
//! the function's environment. Locally a TOML file can be supplied and is
//! overlaid by the same environment variables.

use super::schema::{ArchiveConfig, LogFormat, RetryMode};
use crate::domain::errors::ArchiveError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Destination bucket, as named in the function environment
pub const ENV_S3_BUCKET: &str = "S3_BUCKET";

/// Account id, as named in the function environment
pub const ENV_ACCOUNT_ID: &str = "ACCOUNT_ID";

/// Loads and validates configuration
///
/// This function:
/// 1. Reads the TOML file, if a path is given
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Applies environment variable overrides
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns `ArchiveError::Configuration` if the file cannot be read or
/// parsed, an override is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cwlogs_archive::config::loader::load_config;
///
/// // Environment only, as inside Lambda
/// let config = load_config(None::<&str>).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<ArchiveConfig> {
    let config = read_config(path)?;

    config.validate().map_err(|e| {
        ArchiveError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Reads configuration and applies overrides without validating it
///
/// Used where only the non-export sections are needed (e.g. building AWS
/// clients at cold start) and the export settings are validated later, per
/// invocation.
///
/// # Errors
///
/// Returns `ArchiveError::Configuration` if the file cannot be read or
/// parsed, or an override is malformed.
pub fn read_config(path: Option<impl AsRef<Path>>) -> Result<ArchiveConfig> {
    let mut config = match path {
        Some(path) => parse_file(path.as_ref())?,
        None => ArchiveConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<ArchiveConfig> {
    if !path.exists() {
        return Err(ArchiveError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ArchiveError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents, |key| std::env::var(key).ok())?;

    toml::from_str(&contents)
        .map_err(|e| ArchiveError::Configuration(format!("Failed to parse TOML: {e}")))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ArchiveError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ArchiveError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// `S3_BUCKET` and `ACCOUNT_ID` keep the names the function has always been
/// deployed with; everything else uses the `ARCHIVE_` prefix.
fn apply_env_overrides(
    config: &mut ArchiveConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = lookup(ENV_S3_BUCKET) {
        config.export.bucket = Some(val);
    }
    if let Some(val) = lookup(ENV_ACCOUNT_ID) {
        config.export.account_id = Some(val);
    }

    if let Some(val) = lookup("ARCHIVE_LOG_LEVEL") {
        config.application.log_level = val.to_lowercase();
    }

    // Export overrides
    if let Some(val) = lookup("ARCHIVE_PARAMETER_PREFIX") {
        config.export.parameter_prefix = val;
    }
    if let Some(val) = lookup("ARCHIVE_SOURCE_PREFIX") {
        config.export.source_prefix = Some(val).filter(|prefix| !prefix.is_empty());
    }
    if let Some(val) = lookup("ARCHIVE_DRY_RUN") {
        config.export.dry_run = parse_override("ARCHIVE_DRY_RUN", &val)?;
    }

    // AWS overrides
    if let Some(val) = lookup("ARCHIVE_AWS_REGION") {
        config.aws.region = Some(val);
    }
    if let Some(val) = lookup("ARCHIVE_AWS_MAX_ATTEMPTS") {
        config.aws.max_attempts = parse_override("ARCHIVE_AWS_MAX_ATTEMPTS", &val)?;
    }
    if let Some(val) = lookup("ARCHIVE_AWS_RETRY_MODE") {
        config.aws.retry_mode = val.parse::<RetryMode>().map_err(ArchiveError::Configuration)?;
    }

    // Logging overrides
    if let Some(val) = lookup("ARCHIVE_LOG_FORMAT") {
        config.logging.format = val.parse::<LogFormat>().map_err(ArchiveError::Configuration)?;
    }

    Ok(())
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        ArchiveError::Configuration(format!("Invalid value '{value}' for {key}: {e}"))
    })
}
