//! Serve command implementation
//!
//! Hands the process over to the Lambda runtime loop.

use crate::lambda;
use clap::Args;

/// Arguments for the serve command
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {}

impl ServeArgs {
    /// Execute the serve command
    ///
    /// Only returns when the runtime loop ends, which normally means the
    /// runtime API became unreachable.
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        match lambda::run(config_path).await {
            Ok(()) => Ok(0),
            Err(e) => {
                tracing::error!(error = %e, "Lambda runtime stopped");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
