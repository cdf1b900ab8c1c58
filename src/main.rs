// figma-exporter - Export Figma frames as image files
// Copyright (c) 2025 figma-exporter Contributors
// Licensed under the MIT License

use clap::Parser;
use figma_exporter::cli::{Cli, Commands};
use figma_exporter::config::{load_config_or_default, ExporterConfig};
use figma_exporter::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report config errors themselves.
    let config = load_config_or_default(&cli.config).unwrap_or_else(|_| ExporterConfig::default());
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());

    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "figma-exporter starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("Shutdown signal received, finishing in-flight work");
        eprintln!("\nShutdown signal received, finishing in-flight downloads...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file log first.
    drop(logging_guard);
    process::exit(exit_code);
}

/// Resolve on Ctrl+C, or SIGTERM on unix
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, Ctrl+C only");
            }
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::Formats(args) => args.execute(),
        Commands::UpdateCheck(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
