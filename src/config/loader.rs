//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use super::secret_string;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix for environment overrides, e.g. `FIGMA_EXPORTER_DEPTH`
pub const ENV_PREFIX: &str = "FIGMA_EXPORTER_";

/// Loads and validates configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file (which must exist)
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ExporterConfig`]
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use figma_exporter::config::loader::load_config;
///
/// let config = load_config("figma-exporter.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let config = load_config_or_default(path)?;

    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Environment overrides are applied either way. The result is **not**
/// validated: callers layer command-line overrides on top and then call
/// [`ExporterConfig::validate`].
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            ExporterError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let contents = substitute_env_vars(&contents)?;

        toml::from_str(&contents)
            .map_err(|e| ExporterError::Configuration(format!("Failed to parse TOML: {e}")))?
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults and environment"
        );
        ExporterConfig::default()
    };

    apply_env_overrides(&mut config)?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        ExporterError::Configuration(format!("Invalid value for {ENV_PREFIX}{key} '{value}': {e}"))
    })
}

/// Applies environment variable overrides
///
/// The unprefixed `PROJECT_ID` and `FIGMA_TOKEN` variables (the names a
/// typical `.env` file uses) are read first; `FIGMA_EXPORTER_*` variables
/// take precedence over them.
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PROJECT_ID") {
        config.figma.project_id = val;
    }
    if let Ok(val) = std::env::var("FIGMA_TOKEN") {
        config.figma.token = Some(secret_string(val));
    }

    if let Some(val) = env_var("LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env_var("BASE_URL") {
        config.figma.base_url = val;
    }
    if let Some(val) = env_var("PROJECT_ID") {
        config.figma.project_id = val;
    }
    if let Some(val) = env_var("TOKEN") {
        config.figma.token = Some(secret_string(val));
    }
    if let Some(val) = env_var("TIMEOUT_SECONDS") {
        config.figma.timeout_seconds = parse_env("TIMEOUT_SECONDS", &val)?;
    }

    if let Some(val) = env_var("DIR") {
        config.export.dir = val;
    }
    if let Some(val) = env_var("FORMAT") {
        config.export.format = val;
    }
    if let Some(val) = env_var("DEPTH") {
        config.export.depth = parse_env("DEPTH", &val)?;
    }
    if let Some(val) = env_var("BATCH_SIZE") {
        config.export.batch_size = parse_env("BATCH_SIZE", &val)?;
    }
    if let Some(val) = env_var("MAX_CONCURRENCY") {
        config.export.max_concurrency = parse_env("MAX_CONCURRENCY", &val)?;
    }
    if let Some(val) = env_var("FAILURE_POLICY") {
        config.export.failure_policy = parse_env("FAILURE_POLICY", &val)?;
    }

    if let Some(val) = env_var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FEX_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${FEX_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("FEX_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FEX_LOADER_MISSING_VAR");
        let input = "token = \"${FEX_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FEX_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("FEX_LOADER_COMMENTED_VAR");
        let input = "# token = \"${FEX_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${FEX_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-figma-exporter.toml");
        assert!(matches!(result, Err(ExporterError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent-figma-exporter.toml").unwrap();
        assert_eq!(config.export.batch_size, 20);
    }

    #[test]
    fn test_load_config_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[export\ndir = ").unwrap();
        temp_file.flush().unwrap();

        let err = load_config_or_default(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        let result: Result<usize> = parse_env("DEPTH", "deep");
        assert!(matches!(result, Err(ExporterError::Configuration(_))));
    }
}
