//! Configuration management.
//!
//! # Overview
//!
//! Configuration comes from the function environment, optionally layered on
//! top of a TOML file:
//! - `S3_BUCKET` and `ACCOUNT_ID` are required
//! - `ARCHIVE_*` variables override individual settings
//! - `${VAR_NAME}` placeholders in the TOML file are substituted on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cwlogs_archive::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Some("cwlogs-archive.toml"))?;
//! println!("Exporting to bucket {:?}", config.export.bucket);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! bucket = "${S3_BUCKET}"
//! account_id = "123412341234"
//! parameter_prefix = "/log-exporter-last-export/"
//! source_prefix = "/aws/lambda"
//! dry_run = false
//!
//! [aws]
//! region = "eu-west-1"
//! max_attempts = 10
//! retry_mode = "adaptive"
//!
//! [logging]
//! format = "json"
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, read_config};
pub use schema::{
    ApplicationConfig, ArchiveConfig, AwsConfig, ExportConfig, LogFormat, LoggingConfig,
    RetryMode, DEFAULT_PARAMETER_PREFIX,
};
