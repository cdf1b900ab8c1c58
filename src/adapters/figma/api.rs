//! Figma API trait definition
//!
//! The export pipeline only talks to Figma through [`FigmaApi`], so the core
//! can run against the REST client in production and an in-memory fake in
//! tests.

use crate::domain::ids::{NodeId, ProjectId};
use crate::domain::{Document, ImageFormat, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Remote operations the export pipeline needs
///
/// Implementations hold their own credentials; none of the methods retry.
#[async_trait]
pub trait FigmaApi: Send + Sync {
    /// Fetch and decode the document tree of a file
    ///
    /// # Errors
    ///
    /// - [`ExporterError::Transport`](crate::domain::ExporterError::Transport) if the request can't complete
    /// - [`ExporterError::Api`](crate::domain::ExporterError::Api) on a non-success status
    /// - [`ExporterError::Decode`](crate::domain::ExporterError::Decode) if the body isn't JSON
    /// - [`ExporterError::Protocol`](crate::domain::ExporterError::Protocol) if required fields are missing
    async fn fetch_document(&self, project: &ProjectId) -> Result<Document>;

    /// Ask the render endpoint for image URLs of the given nodes
    ///
    /// Nodes the API could not render are absent from the returned map.
    async fn request_image_urls(
        &self,
        project: &ProjectId,
        ids: &[NodeId],
        format: ImageFormat,
    ) -> Result<HashMap<NodeId, String>>;

    /// Download the body behind a rendered image URL
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
