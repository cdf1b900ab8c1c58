//! External system integrations for figma-exporter.
//!
//! This module provides adapters for everything outside the process:
//!
//! - [`figma`] - Figma REST API (document tree, render URLs, image bytes)
//! - [`filesystem`] - Export directory listing and atomic file writes
//! - [`release`] - Latest-release lookup for `update-check`
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The Figma layer is reached only
//! through the [`figma::FigmaApi`] trait:
//!
//! ```rust,no_run
//! use figma_exporter::adapters::figma::{FigmaApi, FigmaClient};
//! use figma_exporter::config::{FigmaConfig, TokenValue};
//! use secrecy::Secret;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FigmaConfig {
//!     base_url: "https://api.figma.com".to_string(),
//!     project_id: "aBcD1234efGH".to_string(),
//!     token: Some(Secret::new(TokenValue::from("figd_...".to_string()))),
//!     timeout_seconds: 60,
//! };
//!
//! let api: Arc<dyn FigmaApi> = Arc::new(FigmaClient::new(&config)?);
//! // Hand the client to the export coordinator
//! # Ok(())
//! # }
//! ```

pub mod figma;
pub mod filesystem;
pub mod release;
