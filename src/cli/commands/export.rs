//! Export command implementation
//!
//! This module implements the `export` command: render the Figma nodes named
//! after the files in a local directory and write the images next to them.

use crate::config::{load_config_or_default, ExporterConfig, FailurePolicy};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::ExporterError;
use crate::log_error_with_context;
use clap::Args;
use tokio::sync::watch;

/// How many failures are printed before the rest are summarized
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Image directory to search, e.g. `--dir images`
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Image format to export (jpg, png, svg, pdf)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Depth of nodes to search (1 or more)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Node ids per render request
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Requests in flight at once
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// What a failed request does (abort or collect)
    #[arg(long, value_name = "POLICY")]
    pub failure_policy: Option<FailurePolicy>,

    /// Override the Figma file key
    #[arg(long)]
    pub project_id: Option<String>,
}

impl ExportArgs {
    /// Apply CLI overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut ExporterConfig) {
        if let Some(dir) = &self.dir {
            config.export.dir = dir.clone();
        }
        if let Some(format) = &self.format {
            config.export.format = format.clone();
        }
        if let Some(depth) = self.depth {
            config.export.depth = depth;
        }
        if let Some(batch_size) = self.batch_size {
            config.export.batch_size = batch_size;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.export.max_concurrency = max_concurrency;
        }
        if let Some(policy) = self.failure_policy {
            config.export.failure_policy = policy;
        }
        if let Some(project_id) = &self.project_id {
            config.figma.project_id = project_id.clone();
        }
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(e.exit_code());
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            log_error_with_context!(e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let coordinator = match ExportCoordinator::new(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(e.exit_code());
            }
        };

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(ExporterError::Cancelled(reason)) => {
                tracing::info!(reason = %reason, "Export interrupted by user signal");
                println!("Export interrupted. Files already written are complete.");
                return Ok(130);
            }
            Err(e) => {
                log_error_with_context!(e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(e.exit_code());
            }
        };

        print_summary(&summary);

        if summary.is_successful() {
            Ok(0)
        } else {
            Ok(1)
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("Export Summary:");
    println!("  Document: {}", summary.document_name);
    println!("  Nodes searched: {}", summary.nodes_flattened);
    println!("  Local files: {}", summary.local_files);
    println!("  Selected: {}", summary.selected);
    println!("  Render requests: {}", summary.batches);
    println!("  Written: {}", summary.written);
    println!("  Skipped (not rendered): {}", summary.skipped.len());
    println!("  Failed: {}", summary.failures.len());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    if !summary.skipped.is_empty() {
        println!();
        println!("Not rendered by Figma:");
        for id in &summary.skipped {
            println!("  - {id}");
        }
    }

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {failure}");
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }
}
