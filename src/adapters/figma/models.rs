//! Figma REST API models
//!
//! Wire structures for the `/v1/files` and `/v1/images` endpoints. They are
//! kept separate from the domain model and converted at the adapter boundary.

use crate::domain::ids::NodeId;
use crate::domain::{Document, ExporterError, Node, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Response of `GET /v1/files/:key`
///
/// Only the fields the exporter reads are modelled; `components`, `styles`
/// and plugin data are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File name
    pub name: String,

    #[serde(default)]
    pub role: Option<String>,

    /// Display-only; an unparseable timestamp reads as `None`
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Root node (type `DOCUMENT`)
    pub document: NodeResponse,

    #[serde(default)]
    pub schema_version: i64,
}

/// A node as it appears in the file payload
#[derive(Debug, Clone, Deserialize)]
pub struct NodeResponse {
    pub id: NodeId,

    pub name: String,

    /// Omitted by the API for visible nodes
    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub children: Vec<NodeResponse>,
}

fn default_visible() -> bool {
    true
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(|s| {
        match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                tracing::debug!(value = s, error = %e, "Ignoring unparseable lastModified");
                None
            }
        }
    }))
}

impl From<NodeResponse> for Node {
    fn from(node: NodeResponse) -> Self {
        Node {
            id: node.id,
            name: node.name,
            visible: node.visible,
            kind: node.node_type,
            children: node.children.into_iter().map(Node::from).collect(),
        }
    }
}

impl From<FileResponse> for Document {
    fn from(file: FileResponse) -> Self {
        Document {
            name: file.name,
            role: file.role,
            last_modified: file.last_modified,
            version: file.version,
            thumbnail_url: file.thumbnail_url,
            schema_version: file.schema_version,
            root: file.document.into(),
        }
    }
}

/// Response of `GET /v1/images/:key`
///
/// `images` maps node id to a rendered image URL, or `null` when the node
/// could not be rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub err: Option<serde_json::Value>,

    #[serde(default)]
    pub images: Option<HashMap<String, Option<String>>>,

    /// Sent alongside `err`
    #[serde(default)]
    pub status: Option<u16>,
}

impl ImagesResponse {
    /// Resolved URLs keyed by node id
    ///
    /// `null` and empty URLs are dropped here; the downloader reports those
    /// ids as skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Protocol`] when the response carries an `err`
    /// value, has no `images` object, or contains an empty node id.
    pub fn into_url_map(self) -> Result<HashMap<NodeId, String>> {
        if let Some(err) = self.err {
            if !err.is_null() && err != serde_json::Value::Bool(false) {
                let message = err
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                let status = self
                    .status
                    .map(|s| format!(" (status {s})"))
                    .unwrap_or_default();
                return Err(ExporterError::Protocol(format!(
                    "render request reported an error{status}: {message}"
                )));
            }
        }

        let images = self.images.ok_or_else(|| {
            ExporterError::Protocol("render response has no 'images' object".to_string())
        })?;

        let mut urls = HashMap::with_capacity(images.len());
        for (raw_id, url) in images {
            let id = NodeId::new(raw_id).map_err(ExporterError::Protocol)?;
            match url {
                Some(url) if !url.is_empty() => {
                    urls.insert(id, url);
                }
                _ => {
                    tracing::debug!(node_id = %id, "Node was not rendered by the API");
                }
            }
        }

        Ok(urls)
    }
}

/// Error body the API sends with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub err: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Most specific message in the body, if any
    pub fn into_message(self) -> Option<String> {
        self.err.or(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_response_decodes_nested_tree() {
        let json = r#"{
            "name": "Design System",
            "role": "owner",
            "lastModified": "2024-03-01T10:20:30Z",
            "thumbnailUrl": "https://example.com/thumb.png",
            "version": "123456",
            "schemaVersion": 0,
            "components": {},
            "styles": {},
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [
                    {
                        "id": "0:1",
                        "name": "Page 1",
                        "type": "CANVAS",
                        "children": [
                            {"id": "1:1", "name": "Login", "type": "FRAME", "visible": false}
                        ]
                    }
                ]
            }
        }"#;

        let file: FileResponse = serde_json::from_str(json).unwrap();
        let document: Document = file.into();

        assert_eq!(document.name, "Design System");
        assert_eq!(document.role.as_deref(), Some("owner"));
        assert!(document.last_modified.is_some());
        assert_eq!(document.root.kind, "DOCUMENT");

        let page = &document.root.children[0];
        assert!(page.visible);
        let frame = &page.children[0];
        assert_eq!(frame.id.as_str(), "1:1");
        assert!(!frame.visible);
        assert!(frame.children.is_empty());
    }

    #[test]
    fn test_file_response_missing_document_is_error() {
        let result = serde_json::from_str::<FileResponse>(r#"{"name": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_node_with_empty_id_is_error() {
        let json = r#"{"id": "", "name": "x", "type": "FRAME"}"#;
        assert!(serde_json::from_str::<NodeResponse>(json).is_err());
    }

    #[test]
    fn test_images_response_drops_null_urls() {
        let json = r#"{
            "err": null,
            "images": {"1:1": "https://s3/1.png", "1:2": null, "1:3": ""}
        }"#;
        let response: ImagesResponse = serde_json::from_str(json).unwrap();
        let urls = response.into_url_map().unwrap();

        assert_eq!(urls.len(), 1);
        assert_eq!(
            urls.get(&NodeId::new("1:1").unwrap()).map(String::as_str),
            Some("https://s3/1.png")
        );
    }

    #[test]
    fn test_images_response_err_is_protocol_error() {
        let json = r#"{"err": "Render timeout", "images": {}}"#;
        let response: ImagesResponse = serde_json::from_str(json).unwrap();
        let err = response.into_url_map().unwrap_err();
        assert!(matches!(err, ExporterError::Protocol(ref m) if m.contains("Render timeout")));
    }

    #[test]
    fn test_images_response_err_carries_status() {
        let json = r#"{"status": 400, "err": "Invalid parameter: ids", "images": null}"#;
        let response: ImagesResponse = serde_json::from_str(json).unwrap();
        let err = response.into_url_map().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Protocol error: render request reported an error (status 400): Invalid parameter: ids"
        );
    }

    #[test]
    fn test_unparseable_last_modified_is_ignored() {
        let json = r#"{
            "name": "App",
            "lastModified": "yesterday-ish",
            "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT"}
        }"#;
        let file: FileResponse = serde_json::from_str(json).unwrap();
        assert!(file.last_modified.is_none());
        assert_eq!(file.name, "App");
    }

    #[test]
    fn test_null_last_modified_is_none() {
        let json = r#"{
            "name": "App",
            "lastModified": null,
            "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT"}
        }"#;
        let file: FileResponse = serde_json::from_str(json).unwrap();
        assert!(file.last_modified.is_none());
    }

    #[test]
    fn test_images_response_without_images_is_protocol_error() {
        let response: ImagesResponse = serde_json::from_str(r#"{"err": null}"#).unwrap();
        assert!(matches!(
            response.into_url_map(),
            Err(ExporterError::Protocol(_))
        ));
    }

    #[test]
    fn test_error_response_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"status": 403, "err": "Invalid token"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid token"));
    }
}
