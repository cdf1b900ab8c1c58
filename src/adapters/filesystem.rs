//! Local filesystem access
//!
//! Listing the export directory and writing downloaded images. Writes go to a
//! temporary sibling first and are renamed into place, so an interrupted run
//! never leaves a truncated image at the final path.

use crate::domain::{ExporterError, LocalAsset, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn io_err(path: &Path, action: &str, err: std::io::Error) -> ExporterError {
    ExporterError::Filesystem(format!("Failed to {action} {}: {err}", path.display()))
}

/// List the entries of `dir`, sorted by file name
///
/// Entries whose names are not valid UTF-8, or whose type can't be read, are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`ExporterError::Filesystem`] naming `dir` if it is missing or
/// unreadable.
pub async fn list_local_assets(dir: &Path) -> Result<Vec<LocalAsset>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| io_err(dir, "list directory", e))?;

    let mut assets = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| io_err(dir, "list directory", e))?
    {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!(name = ?raw, "Skipping entry with non UTF-8 name");
                continue;
            }
        };

        let is_dir = entry.file_type().await.map(|t| t.is_dir());
        if let Some(asset) = classify_entry(name, is_dir) {
            assets.push(asset);
        }
    }

    assets.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(assets)
}

fn classify_entry(name: String, is_dir: std::io::Result<bool>) -> Option<LocalAsset> {
    match is_dir {
        Ok(true) => Some(LocalAsset::directory(name)),
        Ok(false) => Some(LocalAsset::file(name)),
        Err(e) => {
            tracing::warn!(name = %name, error = %e, "Skipping entry with unreadable file type");
            None
        }
    }
}

/// Create `dir` and its parents if needed
pub async fn ensure_directory(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_err(dir, "create directory", e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    PathBuf::from(format!(
        "{}.{}-{n}.tmp",
        path.display(),
        std::process::id()
    ))
}

/// Write `content` to `path` through a temporary file and a rename
///
/// Parent directories are created as needed. Each call uses its own
/// temporary name, so concurrent writers targeting the same path never
/// share a partially written file; the last rename wins.
///
/// # Errors
///
/// Returns [`ExporterError::Filesystem`] naming the path that failed. The
/// temporary file is removed on failure.
pub async fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).await?;
        }
    }

    let tmp = temp_path_for(path);
    if let Err(e) = tokio::fs::write(&tmp, content).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(&tmp, "write", e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(path, "rename into", e));
    }

    Ok(())
}
