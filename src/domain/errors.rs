//! Domain error types
//!
//! This module defines the error hierarchy for figma-exporter.
//! Errors are domain-specific and don't expose third-party types: HTTP, JSON
//! and I/O failures are converted to strings at the adapter boundary.

use thiserror::Error;

/// Main figma-exporter error type
///
/// Every pipeline stage returns failures as values of this type; nothing in
/// the library terminates the process. The CLI maps variants to exit codes
/// with [`ExporterError::exit_code`].
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Invalid or missing configuration (depth, format, credentials, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The network call could not complete (unreachable host, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote side answered with a non-success HTTP status
    #[error("API error during {operation}: {status} - {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    /// The payload is not well-formed
    #[error("Decode error: {0}")]
    Decode(String),

    /// The payload is well-formed but structurally or semantically invalid
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Directory listing, read, or write failure
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// A concurrent unit of work panicked or was aborted
    #[error("Task error: {0}")]
    Task(String),

    /// The run was stopped by a shutdown signal
    #[error("Export cancelled: {0}")]
    Cancelled(String),
}

impl ExporterError {
    /// Build an [`ExporterError::Api`] for a failed operation
    pub fn api(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    /// Process exit code the CLI reports for this error
    ///
    /// - `2`: configuration error
    /// - `4`: transport or API error
    /// - `5`: any other fatal error
    /// - `130`: cancelled by signal
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Transport(_) | Self::Api { .. } => 4,
            Self::Cancelled(_) => 130,
            Self::Decode(_) | Self::Protocol(_) | Self::Filesystem(_) | Self::Task(_) => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Filesystem(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Decode(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}
