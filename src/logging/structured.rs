//! Structured logging setup using tracing
//!
//! Human-readable output goes to stderr so that command output on stdout
//! stays clean. With `[logging] local_enabled = true` every event is also
//! written as a JSON line to a rolling `figma-exporter.log`.
//!
//! # Example
//!
//! ```no_run
//! use figma_exporter::logging::init_logging;
//! use figma_exporter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{ExporterError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_NAME: &str = "figma-exporter.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking file writer alive; drop it to flush
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides `level` when set. Otherwise only events from this
/// crate at `level` or above are recorded, which keeps reqwest and hyper quiet.
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if the level is unknown, the log
/// directory can't be created, or a global subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("figma_exporter={level}")));

    let console: BoxedLayer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter.clone())
        .boxed();
    let mut layers = vec![console];

    let file_guard = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| ExporterError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        %level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn json_file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        parse_rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

fn parse_log_level(level: &str) -> Result<Level> {
    level.trim().parse::<Level>().map_err(|_| {
        ExporterError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

/// Unknown values fall back to daily rotation
fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
