//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::NodeId;
use std::fmt;
use std::time::Duration;

/// Pipeline stage an item failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The render-URL request of the item's batch failed
    RenderRequest,
    /// Fetching or writing the rendered image failed
    Download,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::RenderRequest => f.write_str("render request"),
            FailureStage::Download => f.write_str("download"),
        }
    }
}

/// A node that could not be exported
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub node_id: NodeId,

    /// Node name, when known
    pub name: Option<String>,

    pub stage: FailureStage,

    pub message: String,
}

impl ItemFailure {
    pub fn new(
        node_id: NodeId,
        name: Option<String>,
        stage: FailureStage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            node_id,
            name,
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "{} ({}) failed during {}: {}",
                name, self.node_id, self.stage, self.message
            ),
            None => write!(
                f,
                "{} failed during {}: {}",
                self.node_id, self.stage, self.message
            ),
        }
    }
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Name of the exported Figma file
    pub document_name: String,

    /// Nodes produced by flattening
    pub nodes_flattened: usize,

    /// Entries in the export directory
    pub local_files: usize,

    /// Nodes selected for export
    pub selected: usize,

    /// Render requests issued
    pub batches: usize,

    /// Nodes with a rendered image URL
    pub urls_resolved: usize,

    /// Files written
    pub written: usize,

    /// Selected nodes the API returned no image for
    pub skipped: Vec<NodeId>,

    /// Items that failed under the collect policy
    pub failures: Vec<ItemFailure>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            document = %self.document_name,
            nodes_flattened = self.nodes_flattened,
            local_files = self.local_files,
            selected = self.selected,
            batches = self.batches,
            urls_resolved = self.urls_resolved,
            written = self.written,
            skipped = self.skipped.len(),
            failed = self.failures.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        for id in &self.skipped {
            tracing::warn!(node_id = %id, "No image was rendered for node");
        }

        if !self.failures.is_empty() {
            tracing::warn!(
                error_count = self.failures.len(),
                "Export completed with errors"
            );
            for failure in &self.failures {
                tracing::error!(
                    node_id = %failure.node_id,
                    stage = %failure.stage,
                    error = %failure.message,
                    "Export failure"
                );
            }
        }
    }
}
