// cwlogs-archive - CloudWatch Logs to S3 archiver
// Copyright (c) 2025 cwlogs-archive Contributors
// Licensed under the MIT License

use clap::{CommandFactory, Parser};
use cwlogs_archive::cli::{Cli, Commands, LAMBDA_RUNTIME_API_ENV};
use cwlogs_archive::config::{read_config, LogFormat, LoggingConfig};
use cwlogs_archive::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let in_lambda = std::env::var_os(LAMBDA_RUNTIME_API_ENV).is_some();

    // Configuration errors are reported by the command itself; here only the
    // logging section matters.
    let (config_log_level, mut logging_config) = match read_config(cli.config.as_deref()) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    if in_lambda {
        // Lambda ships stdout to CloudWatch; the filesystem is read-only.
        logging_config.format = LogFormat::Json;
        logging_config.local_enabled = false;
    }

    let log_level = cli.log_level.clone().unwrap_or(config_log_level);
    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        in_lambda,
        "cwlogs-archive - CloudWatch Logs to S3 archiver"
    );

    let Some(command) = cli.resolved_command(in_lambda) else {
        let _ = Cli::command().print_help();
        process::exit(2);
    };

    let exit_code = match execute_command(&command, cli.config.as_deref()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(command: &Commands, config_path: Option<&str>) -> anyhow::Result<i32> {
    match command {
        Commands::Export(args) => args.execute(config_path).await,
        Commands::Status(args) => args.execute(config_path).await,
        Commands::ValidateConfig(args) => args.execute(config_path).await,
        Commands::Serve(args) => args.execute(config_path).await,
    }
}
