//! Export orchestration and batch processing
//!
//! This module provides the core export logic for figma-exporter, including:
//! - Batched render-URL requests with slot-based merging
//! - Concurrent image downloads with atomic writes
//! - Export coordination and orchestration
//! - Summary and reporting

pub mod batch;
pub mod coordinator;
pub mod download;
pub mod summary;

pub use batch::{partition, BatchConfig, BatchOutcome, BatchRequester, ExportUrlMap};
pub use coordinator::{ExportCoordinator, ExportPlan};
pub use download::{output_path, sanitize_file_stem, DownloadConfig, DownloadOutcome, Downloader};
pub use summary::{ExportSummary, FailureStage, ItemFailure};
