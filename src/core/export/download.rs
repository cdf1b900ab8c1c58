//! Concurrent download of rendered images
//!
//! Every selected node with a resolved URL is fetched in its own task and
//! written atomically to `<dir>/<sanitized name>.<ext>`.

use super::batch::ExportUrlMap;
use super::summary::{FailureStage, ItemFailure};
use crate::adapters::figma::FigmaApi;
use crate::adapters::filesystem::write_file_atomic;
use crate::config::FailurePolicy;
use crate::core::selection::Selection;
use crate::domain::{ExporterError, ImageFormat, NodeId, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Replace characters that are illegal in file names on common filesystems
///
/// `:` `\` `*` `?` `"` `<` `>` `|` and control characters become `-`.
/// Everything else, `/` included, is kept.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ':' | '\\' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Target path for a node named `name`
///
/// A `/` in the name nests the file below `dir`. Empty, `.` and `..`
/// components are dropped so the path never leaves `dir`; a name with
/// nothing left becomes `unnamed`.
///
/// # Examples
///
/// ```
/// use figma_exporter::core::export::download::output_path;
/// use figma_exporter::domain::ImageFormat;
/// use std::path::Path;
///
/// let path = output_path(Path::new("images"), "Group:Icons/Settings", ImageFormat::Png);
/// assert_eq!(path, Path::new("images/Group-Icons/Settings.png"));
/// ```
pub fn output_path(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let sanitized = sanitize_file_stem(name);
    let components: Vec<&str> = sanitized
        .split('/')
        .filter(|c| !c.is_empty() && *c != "." && *c != "..")
        .collect();

    let mut path = dir.to_path_buf();
    match components.split_last() {
        Some((stem, parents)) => {
            for parent in parents {
                path.push(parent);
            }
            path.push(format!("{stem}.{}", format.extension()));
        }
        None => path.push(format!("unnamed.{}", format.extension())),
    }
    path
}

/// Configuration for the download phase
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Directory the images are written to
    pub dir: PathBuf,
    /// Extension of written files
    pub format: ImageFormat,
    /// Downloads in flight at once
    pub max_concurrency: usize,
    /// What a failed download does to the run
    pub failure_policy: FailurePolicy,
}

/// Result of the download phase
#[derive(Debug, Clone, Default)]
pub struct DownloadOutcome {
    /// Files written, in selection order
    pub written: Vec<PathBuf>,
    /// Selected ids without a rendered URL
    pub skipped: Vec<NodeId>,
    /// Failed downloads, under the collect policy
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug)]
struct DownloadJob {
    id: NodeId,
    name: String,
    url: String,
    path: PathBuf,
}

/// Fetches rendered images and writes them to disk
pub struct Downloader {
    api: Arc<dyn FigmaApi>,
    config: DownloadConfig,
    shutdown: watch::Receiver<bool>,
}

impl Downloader {
    pub fn new(
        api: Arc<dyn FigmaApi>,
        config: DownloadConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            config,
            shutdown,
        }
    }

    /// Download every selected id that has a URL
    ///
    /// Ids without a URL are logged at warn level and returned in
    /// [`DownloadOutcome::skipped`].
    ///
    /// # Errors
    ///
    /// - Under [`FailurePolicy::Abort`], the first failed download's error.
    /// - [`ExporterError::Cancelled`] if shutdown was signalled. Downloads
    ///   already in flight finish their write first.
    pub async fn download_all(
        &self,
        selection: &Selection,
        urls: &ExportUrlMap,
    ) -> Result<DownloadOutcome> {
        let mut outcome = DownloadOutcome::default();
        let jobs = self.plan_jobs(selection, urls, &mut outcome.skipped);

        if jobs.is_empty() {
            tracing::debug!("Nothing to download");
            return Ok(outcome);
        }

        tracing::info!(
            files = jobs.len(),
            dir = %self.config.dir.display(),
            "Downloading rendered images"
        );

        let stop = AtomicBool::new(false);
        let mut slots: Vec<Option<Result<usize>>> =
            std::iter::repeat_with(|| None).take(jobs.len()).collect();
        let mut fatal: Option<ExporterError> = None;

        {
            let mut pending = stream::iter(jobs.iter().enumerate())
                .map(|(ordinal, job)| {
                    let stop = &stop;
                    let api = Arc::clone(&self.api);
                    async move {
                        if stop.load(Ordering::SeqCst) {
                            return (ordinal, None);
                        }
                        if *self.shutdown.borrow() {
                            return (
                                ordinal,
                                Some(Err(ExporterError::Cancelled(
                                    "downloads interrupted".to_string(),
                                ))),
                            );
                        }

                        let handle =
                            tokio::spawn(fetch_and_write(api, job.url.clone(), job.path.clone()));
                        let result = match handle.await {
                            Ok(result) => result,
                            Err(e) => Err(ExporterError::Task(format!(
                                "download of {} did not complete: {e}",
                                job.id
                            ))),
                        };
                        (ordinal, Some(result))
                    }
                })
                .buffer_unordered(self.config.max_concurrency.max(1));

            while let Some((ordinal, result)) = pending.next().await {
                match result {
                    Some(Err(e))
                        if fatal.is_none()
                            && (matches!(e, ExporterError::Cancelled(_))
                                || self.config.failure_policy == FailurePolicy::Abort) =>
                    {
                        tracing::error!(
                            node_id = %jobs[ordinal].id,
                            error = %e,
                            "Download failed"
                        );
                        stop.store(true, Ordering::SeqCst);
                        fatal = Some(e);
                    }
                    other => slots[ordinal] = other,
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }

        for (job, slot) in jobs.into_iter().zip(slots) {
            match slot {
                Some(Ok(bytes)) => {
                    tracing::debug!(
                        node_id = %job.id,
                        path = %job.path.display(),
                        bytes,
                        "Wrote image"
                    );
                    outcome.written.push(job.path);
                }
                Some(Err(e)) => {
                    tracing::warn!(node_id = %job.id, error = %e, "Download failed, continuing");
                    outcome.failures.push(ItemFailure::new(
                        job.id,
                        Some(job.name),
                        FailureStage::Download,
                        e.to_string(),
                    ));
                }
                None => {}
            }
        }

        Ok(outcome)
    }

    /// One job per selected id with a URL, in selection order
    fn plan_jobs(
        &self,
        selection: &Selection,
        urls: &ExportUrlMap,
        skipped: &mut Vec<NodeId>,
    ) -> Vec<DownloadJob> {
        let mut jobs = Vec::with_capacity(selection.len());
        let mut targets: HashMap<PathBuf, NodeId> = HashMap::new();

        for id in &selection.ids {
            let url = match urls.get(id) {
                Some(url) if !url.is_empty() => url.clone(),
                _ => {
                    tracing::warn!(node_id = %id, "No rendered image for node, skipping");
                    skipped.push(id.clone());
                    continue;
                }
            };

            let name = selection
                .name_of(id)
                .map(str::to_string)
                .unwrap_or_else(|| id.to_string());
            let path = output_path(&self.config.dir, &name, self.config.format);

            if let Some(other) = targets.insert(path.clone(), id.clone()) {
                tracing::warn!(
                    node_id = %id,
                    other_node_id = %other,
                    path = %path.display(),
                    "Two nodes map to the same file, the last write wins"
                );
            }

            jobs.push(DownloadJob {
                id: id.clone(),
                name,
                url,
                path,
            });
        }

        jobs
    }
}

async fn fetch_and_write(api: Arc<dyn FigmaApi>, url: String, path: PathBuf) -> Result<usize> {
    let bytes = api.fetch_bytes(&url).await?;
    write_file_atomic(&path, &bytes).await?;
    Ok(bytes.len())
}
