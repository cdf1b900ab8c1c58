//! Export coordinator - main orchestrator for the export process
//!
//! This module runs one export end to end: list the export directory, fetch
//! and flatten the document, select nodes by local file name, request render
//! URLs in batches, and download the images.

use crate::adapters::figma::{FigmaApi, FigmaClient};
use crate::adapters::filesystem::list_local_assets;
use crate::config::{ExporterConfig, FailurePolicy};
use crate::core::export::batch::{BatchConfig, BatchRequester};
use crate::core::export::download::{DownloadConfig, Downloader};
use crate::core::export::summary::ExportSummary;
use crate::core::selection::{flatten_document, reconcile, NameIndex, Selection};
use crate::domain::{ExporterError, ImageFormat, NodeId, ProjectId, Result};
use crate::log_phase_complete;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Validated parameters of one export run
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub project: ProjectId,
    pub dir: PathBuf,
    pub format: ImageFormat,
    pub depth: usize,
    pub batch_size: usize,
    pub max_concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl ExportPlan {
    /// Build a plan from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Configuration`] if the configuration doesn't
    /// validate.
    pub fn from_config(config: &ExporterConfig) -> Result<Self> {
        config.validate().map_err(ExporterError::Configuration)?;

        Ok(Self {
            project: config
                .figma
                .project_id()
                .map_err(ExporterError::Configuration)?,
            dir: PathBuf::from(&config.export.dir),
            format: config
                .export
                .image_format()
                .map_err(ExporterError::Configuration)?,
            depth: config.export.depth,
            batch_size: config.export.batch_size,
            max_concurrency: config.export.max_concurrency,
            failure_policy: config.export.failure_policy,
        })
    }
}

/// Export coordinator
pub struct ExportCoordinator {
    api: Arc<dyn FigmaApi>,
    plan: ExportPlan,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the Figma REST API
    pub fn new(config: &ExporterConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let plan = ExportPlan::from_config(config)?;
        let api: Arc<dyn FigmaApi> = Arc::new(FigmaClient::new(&config.figma)?);

        Ok(Self::with_api(api, plan, shutdown))
    }

    /// Create a coordinator over any [`FigmaApi`] implementation
    pub fn with_api(
        api: Arc<dyn FigmaApi>,
        plan: ExportPlan,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            plan,
            shutdown,
        }
    }

    fn check_shutdown(&self, phase: &str) -> Result<()> {
        if *self.shutdown.borrow() {
            tracing::warn!(phase, "Shutdown requested, stopping export");
            return Err(ExporterError::Cancelled(format!("stopped before {phase}")));
        }
        Ok(())
    }

    /// Execute the export
    ///
    /// The directory is listed before any network call so a wrong `--dir`
    /// fails fast. An empty selection ends the run after the document fetch
    /// with zero render requests.
    ///
    /// # Errors
    ///
    /// Any stage error under [`FailurePolicy::Abort`]; under
    /// [`FailurePolicy::Collect`] per-item failures are returned in the
    /// summary instead. Cancellation is always an error.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            project_id = %self.plan.project,
            dir = %self.plan.dir.display(),
            format = %self.plan.format,
            depth = self.plan.depth,
            "Starting export process"
        );

        let phase = Instant::now();
        let assets = list_local_assets(&self.plan.dir).await?;
        summary.local_files = assets.len();
        log_phase_complete!("list", assets.len(), phase.elapsed());

        self.check_shutdown("document fetch")?;
        let phase = Instant::now();
        let document = self.api.fetch_document(&self.plan.project).await?;
        summary.document_name = document.name.clone();
        log_phase_complete!("fetch", document.root.subtree_len(), phase.elapsed());

        let phase = Instant::now();
        let nodes = flatten_document(&document, self.plan.depth)?;
        summary.nodes_flattened = nodes.len();
        let index = NameIndex::build(nodes.iter().copied());
        let selection = reconcile(&index, &assets);
        summary.selected = selection.len();
        log_phase_complete!("select", selection.len(), phase.elapsed());

        if selection.is_empty() {
            tracing::info!(
                local_files = assets.len(),
                "No local file matches a node name, nothing to export"
            );
        }

        self.check_shutdown("render requests")?;
        let phase = Instant::now();
        let requester = BatchRequester::new(
            Arc::clone(&self.api),
            self.plan.project.clone(),
            BatchConfig {
                batch_size: self.plan.batch_size,
                max_concurrency: self.plan.max_concurrency,
                format: self.plan.format,
                failure_policy: self.plan.failure_policy,
            },
            self.shutdown.clone(),
        );
        let batches = requester.request_urls(&selection).await?;
        summary.batches = batches.batches;
        summary.urls_resolved = batches.urls.len();
        log_phase_complete!("render", batches.urls.len(), phase.elapsed());

        // Ids of failed batches are already reported; don't count them as skipped.
        let to_download = without_failed(&selection, batches.failures.iter().map(|f| &f.node_id));
        summary.failures.extend(batches.failures);

        self.check_shutdown("downloads")?;
        let phase = Instant::now();
        let downloader = Downloader::new(
            Arc::clone(&self.api),
            DownloadConfig {
                dir: self.plan.dir.clone(),
                format: self.plan.format,
                max_concurrency: self.plan.max_concurrency,
                failure_policy: self.plan.failure_policy,
            },
            self.shutdown.clone(),
        );
        let downloads = downloader.download_all(&to_download, &batches.urls).await?;
        summary.written = downloads.written.len();
        summary.skipped = downloads.skipped;
        summary.failures.extend(downloads.failures);
        log_phase_complete!("download", summary.written, phase.elapsed());

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}

fn without_failed<'a>(
    selection: &Selection,
    failed: impl IntoIterator<Item = &'a NodeId>,
) -> Selection {
    let failed: HashSet<&NodeId> = failed.into_iter().collect();
    if failed.is_empty() {
        return selection.clone();
    }

    Selection {
        ids: selection
            .ids
            .iter()
            .filter(|id| !failed.contains(id))
            .cloned()
            .collect(),
        names: selection.names.clone(),
        unmatched: selection.unmatched.clone(),
    }
}
