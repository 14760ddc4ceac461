//! Submission, listing and insight operations over durable-else-fallback
//! storage.

use crate::error::ServiceError;
use feedtrack_analysis::{FeedbackAnalyzer, InsightAggregator, RemoteClassifier};
use feedtrack_config::FeedTrackConfig;
use feedtrack_protocol::{FeedbackDraft, FeedbackFilter, FeedbackRecord, InsightResult, NewFeedback};
use feedtrack_store::{FeedbackStore, FileFeedbackStore, MemoryFeedbackStore, StoreError};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;

/// Message returned when a submission has no text.
pub const TEXT_REQUIRED: &str = "Feedback text is required";

/// Accepts feedback, labels it, and persists it.
///
/// Every store operation goes to the durable store first. When that fails,
/// or no durable store is configured, the fallback store serves the request
/// instead. The two stores are never reconciled.
pub struct FeedbackService {
    durable: Option<Arc<dyn FeedbackStore>>,
    fallback: Arc<MemoryFeedbackStore>,
    analyzer: FeedbackAnalyzer,
    aggregator: InsightAggregator,
    insight_window: usize,
}

impl FeedbackService {
    pub fn new(
        durable: Option<Arc<dyn FeedbackStore>>,
        fallback: Arc<MemoryFeedbackStore>,
        remote: Arc<RemoteClassifier>,
        insight_window: usize,
    ) -> Self {
        Self {
            durable,
            fallback,
            analyzer: FeedbackAnalyzer::new(remote.clone()),
            aggregator: InsightAggregator::new(remote),
            insight_window,
        }
    }

    /// Service with no durable store, backed only by `fallback`.
    pub fn offline(
        fallback: Arc<MemoryFeedbackStore>,
        remote: Arc<RemoteClassifier>,
        insight_window: usize,
    ) -> Self {
        Self::new(None, fallback, remote, insight_window)
    }

    /// Assemble the service from loaded configuration.
    ///
    /// A durable store that cannot be opened is logged and skipped; the
    /// service then runs on the fallback store alone.
    pub fn from_config(config: &FeedTrackConfig) -> Result<Self, ServiceError> {
        let remote = RemoteClassifier::from_config(&config.ai)
            .map_err(|err| ServiceError::Setup(err.to_string()))?;
        let durable: Option<Arc<dyn FeedbackStore>> = match config.storage.path.as_deref() {
            Some(path) => match FileFeedbackStore::new(path) {
                Ok(store) => Some(Arc::new(store)),
                Err(err) => {
                    warn!("durable store unavailable at startup (path={path}, reason={err})");
                    None
                }
            },
            None => {
                info!("no durable store configured; using fallback store only");
                None
            }
        };
        Ok(Self::new(
            durable,
            Arc::new(MemoryFeedbackStore::new()),
            Arc::new(remote),
            config.insights.window,
        ))
    }

    pub fn has_durable_store(&self) -> bool {
        self.durable.is_some()
    }

    pub fn fallback_store(&self) -> &Arc<MemoryFeedbackStore> {
        &self.fallback
    }

    pub fn insight_window(&self) -> usize {
        self.insight_window
    }

    /// Validate, analyze, and persist one submission.
    pub async fn submit(&self, submission: NewFeedback) -> Result<FeedbackRecord, ServiceError> {
        if submission.text.trim().is_empty() {
            return Err(ServiceError::Validation(TEXT_REQUIRED.to_string()));
        }
        let analysis = self.analyzer.analyze(&submission.text).await;
        let draft = FeedbackDraft::new(submission, analysis);
        let record = self
            .with_store("create", move |store| {
                let draft = draft.clone();
                async move { store.create(draft).await }
            })
            .await?;
        info!(
            "feedback submitted (id={}, sentiment={}, category={}, offline={})",
            record.id,
            record.analysis.sentiment,
            record.analysis.category,
            record.analysis.is_offline()
        );
        Ok(record)
    }

    pub async fn list_all(&self) -> Result<Vec<FeedbackRecord>, ServiceError> {
        self.list(FeedbackFilter::all(), None).await
    }

    pub async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<FeedbackRecord>, ServiceError> {
        self.list(FeedbackFilter::student(student_id), None).await
    }

    /// Summarize the most recent `insight_window` records.
    pub async fn generate_insights(&self) -> Result<InsightResult, ServiceError> {
        let recent = self
            .list(FeedbackFilter::all(), Some(self.insight_window))
            .await?;
        debug!("generating insights (batch={})", recent.len());
        Ok(self.aggregator.summarize(&recent).await)
    }

    pub(crate) async fn list(
        &self,
        filter: FeedbackFilter,
        limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, ServiceError> {
        let filter = &filter;
        self.with_store("list", move |store| async move {
            store.list(filter, limit).await
        })
        .await
    }

    /// Run `op` against the durable store, then the fallback store if the
    /// durable one is missing or fails.
    pub(crate) async fn with_store<T, F, Fut>(
        &self,
        label: &'static str,
        op: F,
    ) -> Result<T, ServiceError>
    where
        F: Fn(Arc<dyn FeedbackStore>) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        if let Some(durable) = &self.durable {
            match op(durable.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) => warn!(
                    "durable store failed; using fallback store (op={label}, store={}, reason={err})",
                    durable.name()
                ),
            }
        }
        let fallback: Arc<dyn FeedbackStore> = self.fallback.clone();
        Ok(op(fallback).await?)
    }
}
