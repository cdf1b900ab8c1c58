//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use figma_exporter::logging::init_logging;
//! use figma_exporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a pipeline phase
///
/// # Example
///
/// ```no_run
/// use figma_exporter::log_phase_complete;
/// use std::time::Duration;
///
/// log_phase_complete!("flatten", 42, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            phase = $phase,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Phase completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use figma_exporter::log_error_with_context;
/// use figma_exporter::domain::ExporterError;
///
/// let error = ExporterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a batch processing operation
///
/// # Example
///
/// ```no_run
/// use figma_exporter::log_batch_processing;
///
/// log_batch_processing!(2, 3, 20);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr, $size:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            size = $size,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}
