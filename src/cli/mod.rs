//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Environment variable the Lambda runtime sets inside a function sandbox
pub const LAMBDA_RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

/// cwlogs-archive - export CloudWatch log groups to S3 incrementally
#[derive(Parser, Debug)]
#[command(name = "cwlogs-archive")]
#[command(version, about, long_about = None)]
#[command(author = "cwlogs-archive Contributors")]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "ARCHIVE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ARCHIVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute; serves Lambda invocations when omitted inside Lambda
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run, falling back to `serve` inside a Lambda sandbox
    pub fn resolved_command(&self, in_lambda: bool) -> Option<Commands> {
        match &self.command {
            Some(command) => Some(command.clone()),
            None if in_lambda => Some(Commands::Serve(commands::serve::ServeArgs {})),
            None => None,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export every log group from its stored watermark up to now
    Export(commands::export::ExportArgs),

    /// Show stored watermarks
    Status(commands::status::StatusArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),

    /// Run as a Lambda function, one export run per invocation
    Serve(commands::serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["cwlogs-archive", "export"]);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Some(Commands::Export(_))));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "cwlogs-archive",
            "export",
            "--dry-run",
            "--source-prefix",
            "/aws/lambda",
        ]);
        match cli.command {
            Some(Commands::Export(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.source_prefix.as_deref(), Some("/aws/lambda"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["cwlogs-archive", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cwlogs-archive", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Some(Commands::Status(_))));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["cwlogs-archive", "validate-config"]);
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["cwlogs-archive", "serve"]);
        assert!(matches!(cli.command, Some(Commands::Serve(_))));
    }

    #[test]
    fn test_no_command_serves_inside_lambda() {
        let cli = Cli::parse_from(["cwlogs-archive"]);
        assert!(matches!(
            cli.resolved_command(true),
            Some(Commands::Serve(_))
        ));
        assert!(cli.resolved_command(false).is_none());
    }

    #[test]
    fn test_explicit_command_wins_inside_lambda() {
        let cli = Cli::parse_from(["cwlogs-archive", "status"]);
        assert!(matches!(
            cli.resolved_command(true),
            Some(Commands::Status(_))
        ));
    }
}
