//! Figma REST client
//!
//! [`FigmaClient`] implements [`FigmaApi`] over reqwest. Each call is exactly
//! one HTTP round trip: no retries, no caching.

use super::api::FigmaApi;
use super::models::{ErrorResponse, FileResponse, ImagesResponse};
use crate::config::{FigmaConfig, SecretString};
use crate::domain::ids::{NodeId, ProjectId};
use crate::domain::{Document, ExporterError, ImageFormat, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Header carrying the personal access token
pub const TOKEN_HEADER: &str = "X-FIGMA-TOKEN";

/// Figma REST API client
///
/// # Example
///
/// ```no_run
/// use figma_exporter::adapters::figma::{FigmaApi, FigmaClient};
/// use figma_exporter::config::{secret_string, FigmaConfig};
/// use figma_exporter::domain::ProjectId;
///
/// # async fn example() -> figma_exporter::domain::Result<()> {
/// let config = FigmaConfig {
///     project_id: "aBcD1234efGH".to_string(),
///     token: Some(secret_string("figd_...".to_string())),
///     ..Default::default()
/// };
/// let client = FigmaClient::new(&config)?;
/// let document = client.fetch_document(&ProjectId::new("aBcD1234efGH").unwrap()).await?;
/// println!("{} has {} nodes", document.name, document.root.subtree_len());
/// # Ok(())
/// # }
/// ```
pub struct FigmaClient {
    /// API root without trailing slash
    base_url: String,

    /// HTTP client shared by every request of the run
    client: Client,

    /// Personal access token
    token: SecretString,
}

impl FigmaClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Configuration`] if no token is configured or
    /// the HTTP client can't be built.
    pub fn new(config: &FigmaConfig) -> Result<Self> {
        let token = config.token.clone().ok_or_else(|| {
            ExporterError::Configuration("figma.token is required".to_string())
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("figma-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExporterError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token,
        })
    }

    /// Build `{base_url}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ExporterError::Configuration(format!("Invalid figma.base_url '{}': {e}", self.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ExporterError::Configuration(format!(
                    "figma.base_url cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Authenticated GET returning the body as generic JSON
    async fn get_json(&self, url: Url, operation: &str) -> Result<serde_json::Value> {
        tracing::debug!(url = %url, operation, "Sending Figma API request");

        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, self.token.expose_secret().as_ref())
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let response = ensure_success(response, operation).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(operation, e))?;

        serde_json::from_slice(&body)
            .map_err(|e| ExporterError::Decode(format!("{operation}: {e}")))
    }
}

/// Classify a reqwest failure as a transport error naming the operation
fn transport_error(operation: &str, err: reqwest::Error) -> ExporterError {
    if err.is_timeout() {
        ExporterError::Transport(format!("{operation}: request timed out: {err}"))
    } else {
        ExporterError::Transport(format!("{operation}: {err}"))
    }
}

/// Turn a non-success status into [`ExporterError::Api`]
async fn ensure_success(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or(body);

    Err(ExporterError::api(operation, status.as_u16(), message))
}

#[async_trait]
impl FigmaApi for FigmaClient {
    async fn fetch_document(&self, project: &ProjectId) -> Result<Document> {
        let url = self.endpoint(&["v1", "files", project.as_str()])?;
        let value = self.get_json(url, "fetch document").await?;

        let file: FileResponse = serde_json::from_value(value).map_err(|e| {
            ExporterError::Protocol(format!("fetch document: invalid file payload: {e}"))
        })?;

        let document: Document = file.into();
        tracing::info!(
            project_id = %project,
            document = %document.name,
            nodes = document.root.subtree_len(),
            "Fetched document"
        );

        Ok(document)
    }

    async fn request_image_urls(
        &self,
        project: &ProjectId,
        ids: &[NodeId],
        format: ImageFormat,
    ) -> Result<HashMap<NodeId, String>> {
        let joined = ids.iter().map(NodeId::as_str).collect::<Vec<_>>().join(",");

        let mut url = self.endpoint(&["v1", "images", project.as_str()])?;
        url.query_pairs_mut()
            .append_pair("ids", &joined)
            .append_pair("format", format.as_str());

        let value = self.get_json(url, "request image urls").await?;

        let response: ImagesResponse = serde_json::from_value(value).map_err(|e| {
            ExporterError::Protocol(format!("request image urls: invalid payload: {e}"))
        })?;

        response.into_url_map()
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        // Rendered images live on a storage host; the token is not sent there.
        let parsed = Url::parse(url).map_err(|e| {
            ExporterError::Protocol(format!("download image: invalid URL '{url}': {e}"))
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| transport_error("download image", e))?;

        let response = ensure_success(response, "download image").await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error("download image", e))?;

        Ok(bytes.to_vec())
    }
}
