// figma-exporter - Export Figma frames as image files
// Copyright (c) 2025 figma-exporter Contributors
// Licensed under the MIT License

//! # figma-exporter
//!
//! figma-exporter re-renders Figma frames into a local directory. The files
//! already in the directory decide what is exported: `Login.png` selects the
//! node named `Login`, which is rendered through the Figma REST API and
//! written back as `Login.<format>`.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** a Figma file's document tree
//! - **Flattening** the tree to a configurable depth
//! - **Selecting** nodes whose names match local file base names
//! - **Rendering** the selection in batches of node ids, concurrently
//! - **Downloading** the rendered images with atomic writes
//!
//! ## Architecture
//!
//! figma-exporter follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (selection, batching, downloads, coordination)
//! - [`adapters`] - External integrations (Figma API, filesystem, releases)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use figma_exporter::config::load_config;
//! use figma_exporter::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("figma-exporter.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(&config, shutdown_rx)?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Wrote {} images", summary.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Selection
//!
//! ```rust
//! use figma_exporter::core::selection::{flatten_nodes, reconcile, NameIndex};
//! use figma_exporter::domain::{LocalAsset, Node, NodeId};
//!
//! # fn example() -> figma_exporter::domain::Result<()> {
//! let id = |s: &str| NodeId::new(s).unwrap();
//! let root = Node::new(id("0:0"), "Document", "DOCUMENT").with_children(vec![
//!     Node::new(id("1:1"), "Login", "FRAME"),
//!     Node::new(id("1:2"), "Signup", "FRAME"),
//! ]);
//!
//! let nodes = flatten_nodes(&root, 1)?;
//! let index = NameIndex::build(nodes.iter().copied());
//! let selection = reconcile(&index, &[LocalAsset::file("Login.png")]);
//!
//! assert_eq!(selection.ids, vec![id("1:1")]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every stage returns [`domain::ExporterError`]; the library never exits the
//! process. The CLI maps errors to exit codes with
//! [`domain::ExporterError::exit_code`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
