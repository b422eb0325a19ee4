//! Integration tests for configuration loading and validation
//!
//! Tests that touch the process environment hold `ENV_MUTEX`.

use cwlogs_archive::config::{load_config, read_config, LogFormat, RetryMode};
use cwlogs_archive::domain::ArchiveError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "S3_BUCKET",
    "ACCOUNT_ID",
    "ARCHIVE_LOG_LEVEL",
    "ARCHIVE_PARAMETER_PREFIX",
    "ARCHIVE_SOURCE_PREFIX",
    "ARCHIVE_DRY_RUN",
    "ARCHIVE_AWS_REGION",
    "ARCHIVE_AWS_MAX_ATTEMPTS",
    "ARCHIVE_AWS_RETRY_MODE",
    "ARCHIVE_LOG_FORMAT",
    "TEST_ARCHIVE_BUCKET",
];

fn cleanup_env_vars() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
bucket = "archive-bucket"
account_id = "123412341234"
parameter_prefix = "/archive/watermarks/"
source_prefix = "/aws/lambda"
dry_run = true

[aws]
region = "eu-west-1"
max_attempts = 5
retry_mode = "standard"

[logging]
format = "pretty"
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.bucket.as_deref(), Some("archive-bucket"));
    assert_eq!(config.export.account_id().unwrap().as_str(), "123412341234");
    assert_eq!(config.export.parameter_prefix, "/archive/watermarks/");
    assert_eq!(config.export.source_prefix.as_deref(), Some("/aws/lambda"));
    assert!(config.export.dry_run);
    assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.aws.max_attempts, 5);
    assert_eq!(config.aws.retry_mode, RetryMode::Standard);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_environment_only_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("S3_BUCKET", "mybucket2");
    std::env::set_var("ACCOUNT_ID", "123412341234");

    let config = load_config(None::<&str>).unwrap();

    assert_eq!(config.export.bucket.as_deref(), Some("mybucket2"));
    assert_eq!(config.export.parameter_prefix, "/log-exporter-last-export/");
    assert_eq!(config.aws.max_attempts, 10);
    assert_eq!(config.aws.retry_mode, RetryMode::Adaptive);

    cleanup_env_vars();
}

#[test]
fn test_environment_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[export]
bucket = "from-file"
account_id = "123412341234"
dry_run = false
"#,
    );

    std::env::set_var("S3_BUCKET", "from-env");
    std::env::set_var("ARCHIVE_DRY_RUN", "true");
    std::env::set_var("ARCHIVE_AWS_MAX_ATTEMPTS", "3");
    std::env::set_var("ARCHIVE_LOG_LEVEL", "WARN");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.export.bucket.as_deref(), Some("from-env"));
    assert!(config.export.dry_run);
    assert_eq!(config.aws.max_attempts, 3);
    assert_eq!(config.application.log_level, "warn");

    cleanup_env_vars();
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[export]
bucket = "${TEST_ARCHIVE_BUCKET}"
account_id = "123412341234"
"#,
    );

    std::env::set_var("TEST_ARCHIVE_BUCKET", "substituted-bucket");

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.export.bucket.as_deref(), Some("substituted-bucket"));

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[export]
bucket = "${TEST_ARCHIVE_BUCKET}"
"#,
    );

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ArchiveError::Configuration(_)));
    assert!(err.to_string().contains("TEST_ARCHIVE_BUCKET"));
}

#[test]
fn test_missing_bucket_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("ACCOUNT_ID", "123412341234");

    let err = load_config(None::<&str>).unwrap_err();
    assert!(err.to_string().contains("S3_BUCKET"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_account_id_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("S3_BUCKET", "mybucket2");
    std::env::set_var("ACCOUNT_ID", "1");

    let err = load_config(None::<&str>).unwrap_err();
    assert!(matches!(err, ArchiveError::Configuration(_)));

    // Reading without validation still succeeds
    let config = read_config(None::<&str>).unwrap();
    assert_eq!(config.export.account_id.as_deref(), Some("1"));

    cleanup_env_vars();
}

#[test]
fn test_malformed_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("ARCHIVE_AWS_MAX_ATTEMPTS", "many");

    let err = read_config(None::<&str>).unwrap_err();
    assert!(err.to_string().contains("ARCHIVE_AWS_MAX_ATTEMPTS"));

    cleanup_env_vars();
}

#[test]
fn test_missing_file() {
    let err = read_config(Some("/nonexistent/cwlogs-archive.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_invalid_toml() {
    let file = write_config("[export\nbucket = ");
    let err = read_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
