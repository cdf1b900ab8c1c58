//! Configuration management for figma-exporter.
//!
//! # Overview
//!
//! Configuration is layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`figma-exporter.toml` by default) with `${VAR_NAME}` substitution
//! 3. Environment overrides (`PROJECT_ID`, `FIGMA_TOKEN`, `FIGMA_EXPORTER_*`)
//! 4. Command-line flags
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`FigmaConfig`] - API root, project id, access token, request timeout
//! - [`ExportConfig`] - Target directory, format, depth, batch size, concurrency, failure policy
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [figma]
//! project_id = "${PROJECT_ID}"
//! token = "${FIGMA_TOKEN}"
//!
//! [export]
//! dir = "images"
//! format = "png"
//! depth = 1
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use figma_exporter::config::load_config;
//!
//! # fn example() {
//! match load_config("figma-exporter.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, ExportConfig, ExporterConfig, FailurePolicy, FigmaConfig, LoggingConfig,
};
pub use secret::{secret_string, SecretString, TokenValue};
