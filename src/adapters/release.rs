//! Latest-release lookup on GitHub

use crate::domain::{ExporterError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Releases endpoint of the published tool
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/nl-plus-doc/figma-exporter/releases/latest";

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: Option<String>,
}

/// Fetch the tag name of the latest release at `url`
///
/// # Errors
///
/// - [`ExporterError::Transport`] if the request can't complete
/// - [`ExporterError::Api`] on a non-success status
/// - [`ExporterError::Decode`] if the body isn't JSON
/// - [`ExporterError::Protocol`] if `tag_name` is missing or not a string
pub async fn fetch_latest_release(url: &str) -> Result<String> {
    // GitHub rejects requests without a User-Agent.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("figma-exporter/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ExporterError::Configuration(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await
        .map_err(|e| ExporterError::Transport(format!("update check: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ExporterError::Transport(format!("update check: {e}")))?;

    if !status.is_success() {
        return Err(ExporterError::api("update check", status.as_u16(), body));
    }

    let value: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| ExporterError::Decode(format!("update check: {e}")))?;

    let release: ReleaseResponse = serde_json::from_value(value)
        .map_err(|e| ExporterError::Protocol(format!("update check: {e}")))?;

    release.tag_name.ok_or_else(|| {
        ExporterError::Protocol("update check: response has no tag_name".to_string())
    })
}

/// Whether `current` matches `latest`, ignoring a leading `v` on either
pub fn is_up_to_date(current: &str, latest: &str) -> bool {
    let normalize = |v: &str| v.trim().trim_start_matches('v').to_string();
    normalize(current) == normalize(latest)
}
