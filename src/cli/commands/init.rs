//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "figma-exporter.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Create a .env file with your credentials:");
                println!("     PROJECT_ID=<file key from the Figma URL>");
                println!("     FIGMA_TOKEN=<personal access token>");
                println!("  2. Put placeholder files named after your frames in the export directory");
                println!("  3. Validate configuration: figma-exporter validate-config");
                println!("  4. Run export: figma-exporter export --dir images");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# figma-exporter configuration

[application]
log_level = "info"

[figma]
project_id = "${PROJECT_ID}"
token = "${FIGMA_TOKEN}"

[export]
dir = "images"
format = "jpg"
depth = 1
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# figma-exporter configuration
#
# Every file in the export directory whose name (without extension) matches
# a Figma node name is re-rendered from Figma and written next to it.
#
# Values of the form ${VAR} are read from the environment (and .env).
# FIGMA_EXPORTER_* environment variables override this file; command-line
# flags override both.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
log_level = "info"

# ============================================================================
# Figma API
# ============================================================================
[figma]
# API root
base_url = "https://api.figma.com"

# File key, the part after /file/ in the Figma URL
project_id = "${PROJECT_ID}"

# Personal access token, sent as X-FIGMA-TOKEN
token = "${FIGMA_TOKEN}"

# Per-request timeout in seconds
timeout_seconds = 60

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Directory holding the placeholder files
dir = "images"

# Image format: jpg | png | svg | pdf
format = "jpg"

# How many levels below the pages to search.
# 1 = top-level frames, 2 = their children, ...
depth = 1

# Node ids per render request (1-500)
batch_size = 20

# Requests in flight at once, per phase (1-64)
max_concurrency = 8

# abort: stop at the first failed request
# collect: keep going and list failures at the end (exit code 1)
failure_policy = "abort"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to local_path in addition to the console
local_enabled = false
local_path = "./logs"

# Log rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
