//! Configuration schema types
//!
//! This module defines the configuration structure for figma-exporter. Every
//! section has defaults, so an empty file (or no file at all) plus the
//! environment is a valid starting point.

use crate::config::SecretString;
use crate::domain::{ImageFormat, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when a batch request or a download fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run at the first failure and return that error
    #[default]
    Abort,
    /// Record the failure against the affected node ids and keep going
    Collect,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => f.write_str("abort"),
            FailurePolicy::Collect => f.write_str("collect"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "collect" => Ok(FailurePolicy::Collect),
            other => Err(format!(
                "Invalid failure policy '{other}'. Must be one of: abort, collect"
            )),
        }
    }
}

/// Main figma-exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Figma API connection
    #[serde(default)]
    pub figma: FigmaConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.figma.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Figma API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    /// API root, without the `/v1` version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File key of the project to export from
    #[serde(default)]
    pub project_id: String,

    /// Personal access token, sent as `X-FIGMA-TOKEN`
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl FigmaConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("figma.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("figma.base_url must start with http:// or https://".to_string());
        }

        self.project_id()
            .map_err(|e| format!("figma.project_id is invalid: {e}"))?;

        if self
            .token
            .as_ref()
            .map(|t| t.expose_secret().is_blank())
            .unwrap_or(true)
        {
            return Err(
                "figma.token cannot be empty (set FIGMA_TOKEN or figma.token)".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("figma.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    /// Typed project id
    pub fn project_id(&self) -> Result<ProjectId, String> {
        ProjectId::new(self.project_id.as_str())
    }
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: String::new(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory holding the placeholder files; exported images land here too
    #[serde(default)]
    pub dir: String,

    /// Image format (jpg, png, svg, pdf)
    #[serde(default = "default_format")]
    pub format: String,

    /// How many hierarchy levels below the document root to search (>= 1)
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Node ids per render request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Ceiling on concurrent requests in each phase
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Abort on first failure, or collect failures and report at the end
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.trim().is_empty() {
            return Err(
                "export.dir cannot be empty. Please specify a directory, e.g. `--dir images`"
                    .to_string(),
            );
        }

        self.image_format()?;

        if self.depth < 1 {
            return Err(format!(
                "export.depth must be 1 or more, got {}",
                self.depth
            ));
        }

        if !(1..=500).contains(&self.batch_size) {
            return Err(format!(
                "export.batch_size must be between 1 and 500, got {}",
                self.batch_size
            ));
        }

        if self.max_concurrency == 0 || self.max_concurrency > 64 {
            return Err(format!(
                "export.max_concurrency must be between 1 and 64, got {}",
                self.max_concurrency
            ));
        }

        Ok(())
    }

    /// Typed image format
    pub fn image_format(&self) -> Result<ImageFormat, String> {
        ImageFormat::from_str(&self.format)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            format: default_format(),
            depth: default_depth(),
            batch_size: default_batch_size(),
            max_concurrency: default_max_concurrency(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.figma.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_format() -> String {
    "jpg".to_string()
}

// Pages and their top-level frames.
fn default_depth() -> usize {
    1
}

fn default_batch_size() -> usize {
    20
}

fn default_max_concurrency() -> usize {
    8
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
