//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for figma-exporter using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// figma-exporter - Export Figma frames as images
#[derive(Parser, Debug)]
#[command(name = "figma-exporter")]
#[command(version, about, long_about = None)]
#[command(author = "figma-exporter contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "figma-exporter.toml",
        env = "FIGMA_EXPORTER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FIGMA_EXPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the frames named after the files in a directory
    Export(commands::export::ExportArgs),

    /// List supported image formats
    Formats(commands::formats::FormatsArgs),

    /// Check whether a newer release is available
    UpdateCheck(commands::update_check::UpdateCheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["figma-exporter", "export"]);
        assert_eq!(cli.config, "figma-exporter.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "figma-exporter",
            "export",
            "--dir",
            "images",
            "--format",
            "png",
            "--depth",
            "3",
            "--failure-policy",
            "collect",
        ]);

        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.dir.as_deref(), Some("images"));
                assert_eq!(args.format.as_deref(), Some("png"));
                assert_eq!(args.depth, Some(3));
                assert_eq!(args.failure_policy, Some(FailurePolicy::Collect));
            }
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_failure_policy() {
        let result = Cli::try_parse_from([
            "figma-exporter",
            "export",
            "--failure-policy",
            "sometimes",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["figma-exporter", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["figma-exporter", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_other_commands() {
        let cli = Cli::parse_from(["figma-exporter", "formats"]);
        assert!(matches!(cli.command, Commands::Formats(_)));

        let cli = Cli::parse_from(["figma-exporter", "update-check"]);
        assert!(matches!(cli.command, Commands::UpdateCheck(_)));

        let cli = Cli::parse_from(["figma-exporter", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));

        let cli = Cli::parse_from(["figma-exporter", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
