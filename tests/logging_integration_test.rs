//! Integration tests for logging initialization
//!
//! A global subscriber can only be installed once per process, so the
//! successful path lives in a single test.

use figma_exporter::config::LoggingConfig;
use figma_exporter::domain::ExporterError;
use figma_exporter::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let result = init_logging("loud", &LoggingConfig::default());
    assert!(matches!(result, Err(ExporterError::Configuration(ref m)) if m.contains("loud")));
}

#[test]
fn test_file_logging_creates_directory_and_installs_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("nested");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    tracing::info!(frames = 2, "logging integration test");

    let second = init_logging("info", &LoggingConfig::default());
    assert!(matches!(second, Err(ExporterError::Configuration(_))));

    drop(guard);
    assert!(log_path.join("figma-exporter.log").exists());
}
