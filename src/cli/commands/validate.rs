//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the figma-exporter configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates, so success here means the file is usable
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Figma API: {}", config.figma.base_url);
        println!("  Project ID: {}", config.figma.project_id);
        println!(
            "  Token: {}",
            if config.figma.token.is_some() {
                "[REDACTED]"
            } else {
                "(not set)"
            }
        );
        println!("  Timeout: {}s", config.figma.timeout_seconds);
        println!("  Directory: {}", config.export.dir);
        println!("  Format: {}", config.export.format);
        println!("  Depth: {}", config.export.depth);
        println!("  Batch Size: {}", config.export.batch_size);
        println!("  Max Concurrency: {}", config.export.max_concurrency);
        println!("  Failure Policy: {}", config.export.failure_policy);
        println!();
        Ok(0)
    }
}
