//! Status command implementation
//!
//! This module implements the `status` command for displaying the stored
//! watermarks.

use crate::adapters::create_service_clients;
use crate::config::read_config;
use crate::core::state::{StateManager, StoredWatermark};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Only show log groups whose names start with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub source_prefix: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("Export Status");
        println!();

        // Bucket and account id are not needed to read watermarks
        let config = match read_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let clients = create_service_clients(&config.aws).await;
        let state_manager =
            StateManager::new(clients.parameter_store, config.export.parameter_prefix.clone());

        let watermarks = match state_manager.list_watermarks().await {
            Ok(w) => w,
            Err(e) => {
                println!("Failed to load watermarks");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        if watermarks.is_empty() {
            println!("No export history found under {}.", state_manager.prefix());
            println!("Run 'cwlogs-archive export' to start exporting log groups.");
            return Ok(0);
        }

        let filtered = filter_by_source_prefix(&watermarks, self.source_prefix.as_deref());

        if filtered.is_empty() {
            println!("No watermarks match the specified filter.");
            return Ok(0);
        }

        println!("Found {} watermark(s):", filtered.len());
        println!();
        println!("{:<60} {:<16} {:<25}", "Log Group", "Watermark", "Exported Until");
        println!("{}", "-".repeat(101));

        for stored in filtered {
            let exported_until = match stored.watermark {
                Some(watermark) if watermark.as_millis() == 0 => "Never".to_string(),
                Some(watermark) => watermark
                    .to_datetime()
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "Out of range".to_string()),
                None => "Unreadable".to_string(),
            };

            println!(
                "{:<60} {:<16} {:<25}",
                stored.source_key, stored.raw_value, exported_until
            );
        }

        println!();

        Ok(0)
    }
}

/// Keeps the watermarks of log groups starting with `prefix`
///
/// Stored keys have their leading separator merged into the parameter
/// prefix, so the comparison ignores leading separators on both sides.
fn filter_by_source_prefix<'a>(
    watermarks: &'a [StoredWatermark],
    prefix: Option<&str>,
) -> Vec<&'a StoredWatermark> {
    let prefix = prefix.map(|p| p.trim_start_matches('/'));
    watermarks
        .iter()
        .filter(|stored| {
            prefix.map_or(true, |p| {
                stored.source_key.trim_start_matches('/').starts_with(p)
            })
        })
        .collect()
}
