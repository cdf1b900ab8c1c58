//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they don't
//! interfere with each other.

use figma_exporter::config::{load_config, load_config_or_default, FailurePolicy};
use figma_exporter::domain::{ExporterError, ImageFormat};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "PROJECT_ID",
    "FIGMA_TOKEN",
    "FIGMA_EXPORTER_LOG_LEVEL",
    "FIGMA_EXPORTER_PROJECT_ID",
    "FIGMA_EXPORTER_TOKEN",
    "FIGMA_EXPORTER_DIR",
    "FIGMA_EXPORTER_FORMAT",
    "FIGMA_EXPORTER_DEPTH",
    "FIGMA_EXPORTER_BATCH_SIZE",
    "FIGMA_EXPORTER_MAX_CONCURRENCY",
    "FIGMA_EXPORTER_FAILURE_POLICY",
    "FEX_IT_PROJECT",
    "FEX_IT_TOKEN",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[figma]
base_url = "https://figma.internal.example"
project_id = "aBcD1234efGH"
token = "figd_test_token"
timeout_seconds = 15

[export]
dir = "assets/screens"
format = "svg"
depth = 3
batch_size = 50
max_concurrency = 4
failure_policy = "collect"

[logging]
local_enabled = false
local_path = "/tmp/figma-exporter"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.figma.base_url, "https://figma.internal.example");
    assert_eq!(config.figma.project_id, "aBcD1234efGH");
    assert_eq!(
        config
            .figma
            .token
            .as_ref()
            .map(|t| t.expose_secret().as_ref().to_string()),
        Some("figd_test_token".to_string())
    );
    assert_eq!(config.figma.timeout_seconds, 15);
    assert_eq!(config.export.dir, "assets/screens");
    assert_eq!(config.export.image_format().unwrap(), ImageFormat::Svg);
    assert_eq!(config.export.depth, 3);
    assert_eq!(config.export.batch_size, 50);
    assert_eq!(config.export.max_concurrency, 4);
    assert_eq!(config.export.failure_policy, FailurePolicy::Collect);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[figma]
project_id = "aBcD1234efGH"
token = "figd_test_token"

[export]
dir = "images"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.figma.base_url, "https://api.figma.com");
    assert_eq!(config.figma.timeout_seconds, 60);
    assert_eq!(config.export.format, "jpg");
    assert_eq!(config.export.depth, 1);
    assert_eq!(config.export.batch_size, 20);
    assert_eq!(config.export.max_concurrency, 8);
    assert_eq!(config.export.failure_policy, FailurePolicy::Abort);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("FEX_IT_PROJECT", "fromEnvKey");
    std::env::set_var("FEX_IT_TOKEN", "figd_from_env");

    let file = write_config(
        r#"
[figma]
project_id = "${FEX_IT_PROJECT}"
token = "${FEX_IT_TOKEN}"

[export]
dir = "images"
"#,
    );

    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(config.figma.project_id, "fromEnvKey");
    assert_eq!(
        config
            .figma
            .token
            .as_ref()
            .map(|t| t.expose_secret().as_ref().to_string()),
        Some("figd_from_env".to_string())
    );
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[figma]
project_id = "${FEX_IT_PROJECT}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ExporterError::Configuration(ref m) if m.contains("FEX_IT_PROJECT")));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("FIGMA_EXPORTER_LOG_LEVEL", "trace");
    std::env::set_var("FIGMA_EXPORTER_FORMAT", "PNG");
    std::env::set_var("FIGMA_EXPORTER_BATCH_SIZE", "100");
    std::env::set_var("FIGMA_EXPORTER_FAILURE_POLICY", "collect");

    let file = write_config(
        r#"
[application]
log_level = "info"

[figma]
project_id = "aBcD1234efGH"
token = "figd_test_token"

[export]
dir = "images"
format = "jpg"
batch_size = 20
"#,
    );

    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.image_format().unwrap(), ImageFormat::Png);
    assert_eq!(config.export.batch_size, 100);
    assert_eq!(config.export.failure_policy, FailurePolicy::Collect);
}

#[test]
fn test_prefixed_env_wins_over_legacy_names() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("PROJECT_ID", "legacyKey");
    std::env::set_var("FIGMA_TOKEN", "figd_legacy");
    std::env::set_var("FIGMA_EXPORTER_PROJECT_ID", "prefixedKey");

    let config = load_config_or_default("no-such-figma-exporter.toml").unwrap();
    cleanup_env_vars();

    assert_eq!(config.figma.project_id, "prefixedKey");
    assert!(config.figma.token.is_some());
}

#[test]
fn test_invalid_env_override_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("FIGMA_EXPORTER_DEPTH", "very");

    let result = load_config_or_default("no-such-figma-exporter.toml");
    cleanup_env_vars();

    assert!(matches!(result, Err(ExporterError::Configuration(ref m)) if m.contains("FIGMA_EXPORTER_DEPTH")));
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        ("[figma]\nproject_id = \"k\"\n[export]\ndir = \"images\"", "token"),
        (
            "[figma]\nproject_id = \"k\"\ntoken = \"t\"\n[export]\ndir = \"images\"\ndepth = 0",
            "depth",
        ),
        (
            "[figma]\nproject_id = \"k\"\ntoken = \"t\"\n[export]\ndir = \"images\"\nformat = \"gif\"",
            "unsupported format",
        ),
        (
            "[figma]\nproject_id = \"k\"\ntoken = \"t\"\n[export]\ndir = \"images\"\nbatch_size = 0",
            "batch_size",
        ),
        ("[figma]\nproject_id = \"k\"\ntoken = \"t\"", "export.dir"),
    ];

    for (content, expected) in cases {
        let file = write_config(content);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in '{err}'"
        );
    }
}

#[test]
fn test_token_is_redacted_in_debug_output() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[figma]
project_id = "aBcD1234efGH"
token = "figd_super_secret"

[export]
dir = "images"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("figd_super_secret"));
}
