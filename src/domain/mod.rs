//! Domain models and types for figma-exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`NodeId`], [`ProjectId`])
//! - **Document model** ([`Document`], [`Node`])
//! - **Local files** ([`LocalAsset`])
//! - **Export formats** ([`ImageFormat`])
//! - **Error types** ([`ExporterError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a project key can't be passed where
//! a node id is expected:
//!
//! ```rust
//! use figma_exporter::domain::{NodeId, ProjectId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let node = NodeId::new("1:2")?;
//! let project = ProjectId::new("aBcD1234efGH")?;
//!
//! // let wrong: NodeId = project;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod errors;
pub mod format;
pub mod ids;
pub mod node;
pub mod result;

// Re-export commonly used types for convenience
pub use asset::LocalAsset;
pub use errors::ExporterError;
pub use format::ImageFormat;
pub use ids::{NodeId, ProjectId};
pub use node::{Document, Node};
pub use result::Result;
