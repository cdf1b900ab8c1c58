//! Core business logic for figma-exporter.
//!
//! This module contains the export pipeline and its orchestration.
//!
//! # Modules
//!
//! - [`selection`] - Document flattening and matching against local files
//! - [`export`] - Render-URL batching, downloads, coordination and reporting
//!
//! # Export Workflow
//!
//! 1. **List**: Read the export directory
//! 2. **Fetch**: Download and decode the document tree
//! 3. **Flatten**: Collect nodes down to the configured depth
//! 4. **Select**: Match local base names against node names
//! 5. **Render**: Request image URLs in batches, concurrently
//! 6. **Download**: Fetch every image and write it atomically
//! 7. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use figma_exporter::config::load_config;
//! use figma_exporter::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = load_config("figma-exporter.toml")?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! // Create export coordinator
//! let coordinator = ExportCoordinator::new(&config, shutdown_rx)?;
//!
//! // Execute export
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Selected: {}", summary.selected);
//! println!("Written: {}", summary.written);
//! println!("Failed: {}", summary.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod selection;
