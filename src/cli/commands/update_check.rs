//! Update check command implementation
//!
//! Compares the running version with the latest published release.

use crate::adapters::release::{fetch_latest_release, is_up_to_date, DEFAULT_RELEASES_URL};
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the update-check command
#[derive(Args, Debug)]
pub struct UpdateCheckArgs {
    /// Releases endpoint to query
    #[arg(long, default_value = DEFAULT_RELEASES_URL)]
    pub url: String,
}

impl UpdateCheckArgs {
    /// Execute the update-check command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let current = env!("CARGO_PKG_VERSION");
        tracing::debug!(url = %self.url, current, "Checking for updates");

        let latest = match fetch_latest_release(&self.url).await {
            Ok(tag) => tag,
            Err(e) => {
                log_error_with_context!(e, "Update check failed");
                eprintln!("Update check failed: {e}");
                return Ok(e.exit_code());
            }
        };

        if is_up_to_date(current, &latest) {
            println!("Already up to date.");
        } else {
            println!("latest: {latest}");
        }

        Ok(0)
    }
}
