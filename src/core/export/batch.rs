//! Batched render-URL requests
//!
//! Selected node ids are split into contiguous chunks, one render request is
//! issued per chunk with a bounded number in flight, and the per-chunk maps
//! are merged into a single [`ExportUrlMap`] once every request has settled.

use super::summary::{FailureStage, ItemFailure};
use crate::adapters::figma::FigmaApi;
use crate::config::FailurePolicy;
use crate::core::selection::Selection;
use crate::domain::{ExporterError, ImageFormat, NodeId, ProjectId, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Rendered image URL per node id
pub type ExportUrlMap = HashMap<NodeId, String>;

/// Split `ids` into contiguous chunks of at most `batch_size`
///
/// Every chunk has exactly `batch_size` ids except the last. An empty input
/// gives no chunks. A `batch_size` of 0 is treated as 1.
pub fn partition(ids: &[NodeId], batch_size: usize) -> Vec<Vec<NodeId>> {
    ids.chunks(batch_size.max(1))
        .map(<[NodeId]>::to_vec)
        .collect()
}

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Node ids per render request
    pub batch_size: usize,
    /// Render requests in flight at once
    pub max_concurrency: usize,
    /// Requested image format
    pub format: ImageFormat,
    /// What a failed request does to the run
    pub failure_policy: FailurePolicy,
}

/// Result of the render-URL phase
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Merged URLs of every successful chunk
    pub urls: ExportUrlMap,
    /// Number of chunks issued
    pub batches: usize,
    /// Ids of failed chunks, under the collect policy
    pub failures: Vec<ItemFailure>,
}

/// Issues render requests for a selection
pub struct BatchRequester {
    api: Arc<dyn FigmaApi>,
    project: ProjectId,
    config: BatchConfig,
    shutdown: watch::Receiver<bool>,
}

impl BatchRequester {
    pub fn new(
        api: Arc<dyn FigmaApi>,
        project: ProjectId,
        config: BatchConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            project,
            config,
            shutdown,
        }
    }

    /// Request render URLs for every selected id
    ///
    /// Each chunk's result lands in its own slot; slots are merged in chunk
    /// order after all requests settle, later chunks overwriting earlier ones.
    /// Ids the API returns that were not asked for in that chunk are dropped.
    ///
    /// # Errors
    ///
    /// - Under [`FailurePolicy::Abort`], the first failed request's error.
    /// - [`ExporterError::Cancelled`] if shutdown was signalled, regardless of
    ///   policy. Requests already in flight are allowed to settle first.
    pub async fn request_urls(&self, selection: &Selection) -> Result<BatchOutcome> {
        let chunks = partition(&selection.ids, self.config.batch_size);
        let total = chunks.len();

        if chunks.is_empty() {
            tracing::debug!("Nothing selected, no render requests issued");
            return Ok(BatchOutcome::default());
        }

        tracing::info!(
            ids = selection.len(),
            batches = total,
            batch_size = self.config.batch_size,
            format = %self.config.format,
            "Requesting render URLs"
        );

        let stop = AtomicBool::new(false);
        let mut slots: Vec<Option<Result<ExportUrlMap>>> =
            std::iter::repeat_with(|| None).take(total).collect();
        let mut fatal: Option<ExporterError> = None;

        {
            let mut pending = stream::iter(chunks.iter().enumerate())
                .map(|(ordinal, chunk)| {
                    let stop = &stop;
                    async move {
                        if stop.load(Ordering::SeqCst) {
                            return (ordinal, None);
                        }
                        if *self.shutdown.borrow() {
                            return (
                                ordinal,
                                Some(Err(ExporterError::Cancelled(
                                    "render requests interrupted".to_string(),
                                ))),
                            );
                        }

                        crate::log_batch_processing!(ordinal + 1, total, chunk.len());
                        let result = self
                            .api
                            .request_image_urls(&self.project, chunk, self.config.format)
                            .await;
                        (ordinal, Some(result))
                    }
                })
                .buffer_unordered(self.config.max_concurrency.max(1));

            while let Some((ordinal, outcome)) = pending.next().await {
                match outcome {
                    Some(Err(e))
                        if fatal.is_none()
                            && (matches!(e, ExporterError::Cancelled(_))
                                || self.config.failure_policy == FailurePolicy::Abort) =>
                    {
                        tracing::error!(batch = ordinal + 1, error = %e, "Render request failed");
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

        Ok(merge(selection, &chunks, slots))
    }
}

/// Fold per-chunk slots into one outcome, in chunk order
fn merge(
    selection: &Selection,
    chunks: &[Vec<NodeId>],
    slots: Vec<Option<Result<ExportUrlMap>>>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        batches: chunks.len(),
        ..Default::default()
    };

    for (ordinal, (chunk, slot)) in chunks.iter().zip(slots).enumerate() {
        match slot {
            Some(Ok(urls)) => {
                for (id, url) in urls {
                    if chunk.contains(&id) {
                        outcome.urls.insert(id, url);
                    } else {
                        tracing::warn!(
                            batch = ordinal + 1,
                            node_id = %id,
                            "API returned an id that was not requested, ignoring"
                        );
                    }
                }
            }
            Some(Err(e)) => {
                tracing::warn!(
                    batch = ordinal + 1,
                    ids = chunk.len(),
                    error = %e,
                    "Render request failed, recording its ids"
                );
                let message = e.to_string();
                outcome
                    .failures
                    .extend(chunk.iter().map(|id| {
                        ItemFailure::new(
                            id.clone(),
                            selection.name_of(id).map(str::to_string),
                            FailureStage::RenderRequest,
                            message.clone(),
                        )
                    }));
            }
            None => {}
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Document;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use test_case::test_case;

    fn ids(n: usize) -> Vec<NodeId> {
        (0..n)
            .map(|i| NodeId::new(format!("1:{i}")).unwrap())
            .collect()
    }

    fn selection_of(ids: Vec<NodeId>) -> Selection {
        let names = ids
            .iter()
            .map(|id| (id.clone(), format!("Frame {id}")))
            .collect();
        Selection {
            ids,
            names,
            unmatched: Vec::new(),
        }
    }

    /// Renders every id except the ones in `fail_on`, whose chunk errors out
    struct FakeRenderApi {
        calls: Mutex<Vec<Vec<NodeId>>>,
        fail_on: HashSet<NodeId>,
        extra: Option<NodeId>,
    }

    impl FakeRenderApi {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: HashSet::new(),
                extra: None,
            }
        }

        fn call_sizes(&self) -> Vec<usize> {
            let mut sizes: Vec<usize> = self.calls.lock().unwrap().iter().map(Vec::len).collect();
            sizes.sort_unstable_by(|a, b| b.cmp(a));
            sizes
        }
    }

    #[async_trait]
    impl FigmaApi for FakeRenderApi {
        async fn fetch_document(&self, _project: &ProjectId) -> Result<Document> {
            unreachable!("not used by the batch requester")
        }

        async fn request_image_urls(
            &self,
            _project: &ProjectId,
            ids: &[NodeId],
            format: ImageFormat,
        ) -> Result<HashMap<NodeId, String>> {
            self.calls.lock().unwrap().push(ids.to_vec());
            if ids.iter().any(|id| self.fail_on.contains(id)) {
                return Err(ExporterError::api("request image urls", 500, "render failed"));
            }
            let mut urls: HashMap<NodeId, String> = ids
                .iter()
                .map(|id| (id.clone(), format!("https://cdn/{id}.{format}")))
                .collect();
            if let Some(extra) = &self.extra {
                urls.insert(extra.clone(), "https://cdn/extra".to_string());
            }
            Ok(urls)
        }

        async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            unreachable!("not used by the batch requester")
        }
    }

    fn requester(
        api: Arc<FakeRenderApi>,
        policy: FailurePolicy,
    ) -> (BatchRequester, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let requester = BatchRequester::new(
            api,
            ProjectId::new("abc123").unwrap(),
            BatchConfig {
                batch_size: 20,
                max_concurrency: 4,
                format: ImageFormat::Png,
                failure_policy: policy,
            },
            rx,
        );
        (requester, tx)
    }

    #[test_case(0, 20, vec![] ; "empty input")]
    #[test_case(41, 20, vec![20, 20, 1] ; "forty one ids")]
    #[test_case(40, 20, vec![20, 20] ; "exact multiple")]
    #[test_case(3, 20, vec![3] ; "single short chunk")]
    #[test_case(5, 0, vec![1, 1, 1, 1, 1] ; "zero size treated as one")]
    fn test_partition_sizes(n: usize, batch_size: usize, expected: Vec<usize>) {
        let chunks = partition(&ids(n), batch_size);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, expected);
    }

    #[test]
    fn test_partition_preserves_order() {
        let input = ids(45);
        let rebuilt: Vec<NodeId> = partition(&input, 20).into_iter().flatten().collect();
        assert_eq!(rebuilt, input);
    }

    #[tokio::test]
    async fn test_request_urls_merges_every_chunk() {
        let api = Arc::new(FakeRenderApi::new());
        let (requester, _tx) = requester(Arc::clone(&api), FailurePolicy::Abort);

        let outcome = requester.request_urls(&selection_of(ids(41))).await.unwrap();

        assert_eq!(outcome.batches, 3);
        assert_eq!(outcome.urls.len(), 41);
        assert!(outcome.failures.is_empty());
        assert_eq!(api.call_sizes(), vec![20, 20, 1]);
        assert_eq!(
            outcome.urls.get(&NodeId::new("1:40").unwrap()).map(String::as_str),
            Some("https://cdn/1:40.png")
        );
    }

    #[tokio::test]
    async fn test_empty_selection_issues_no_requests() {
        let api = Arc::new(FakeRenderApi::new());
        let (requester, _tx) = requester(Arc::clone(&api), FailurePolicy::Abort);

        let outcome = requester.request_urls(&Selection::default()).await.unwrap();

        assert_eq!(outcome.batches, 0);
        assert!(outcome.urls.is_empty());
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_abort_policy_returns_first_error() {
        let mut fake = FakeRenderApi::new();
        fake.fail_on.insert(NodeId::new("1:25").unwrap());
        let (requester, _tx) = requester(Arc::new(fake), FailurePolicy::Abort);

        let err = requester
            .request_urls(&selection_of(ids(41)))
            .await
            .unwrap_err();
        assert!(matches!(err, ExporterError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_collect_policy_records_failed_chunk() {
        let mut fake = FakeRenderApi::new();
        fake.fail_on.insert(NodeId::new("1:25").unwrap());
        let (requester, _tx) = requester(Arc::new(fake), FailurePolicy::Collect);

        let outcome = requester.request_urls(&selection_of(ids(41))).await.unwrap();

        assert_eq!(outcome.urls.len(), 21);
        assert_eq!(outcome.failures.len(), 20);
        assert!(outcome
            .failures
            .iter()
            .all(|f| f.stage == FailureStage::RenderRequest));
        assert_eq!(
            outcome.failures[0].name.as_deref(),
            Some("Frame 1:20")
        );
    }

    #[tokio::test]
    async fn test_unrequested_ids_are_dropped() {
        let mut fake = FakeRenderApi::new();
        fake.extra = Some(NodeId::new("9:9").unwrap());
        let (requester, _tx) = requester(Arc::new(fake), FailurePolicy::Abort);

        let outcome = requester.request_urls(&selection_of(ids(3))).await.unwrap();

        assert_eq!(outcome.urls.len(), 3);
        assert!(!outcome.urls.contains_key(&NodeId::new("9:9").unwrap()));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_even_when_collecting() {
        let api = Arc::new(FakeRenderApi::new());
        let (requester, tx) = requester(Arc::clone(&api), FailurePolicy::Collect);
        tx.send(true).unwrap();

        let err = requester
            .request_urls(&selection_of(ids(41)))
            .await
            .unwrap_err();

        assert!(matches!(err, ExporterError::Cancelled(_)));
        assert!(api.calls.lock().unwrap().is_empty());
    }
}
