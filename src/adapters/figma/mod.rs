//! Figma adapter implementation
//!
//! This module provides the integration with the Figma REST API: the
//! [`FigmaApi`] seam used by the export pipeline, the reqwest-backed
//! [`FigmaClient`], and the wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::FigmaApi;
pub use client::{FigmaClient, TOKEN_HEADER};
pub use models::{ErrorResponse, FileResponse, ImagesResponse, NodeResponse};
