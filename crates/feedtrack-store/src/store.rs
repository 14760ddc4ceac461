//! Store interface and query helpers shared by the backends.

use crate::error::StoreError;
use async_trait::async_trait;
use feedtrack_protocol::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord};
use std::collections::BTreeSet;

#[async_trait]
/// Record store the feedback service persists through.
pub trait FeedbackStore: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Assign identity and creation time, then persist.
    async fn create(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, StoreError>;

    /// Matching records, newest first, optionally truncated to `limit`.
    async fn list(
        &self,
        filter: &FeedbackFilter,
        limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, StoreError>;

    /// Number of matching records.
    async fn count(&self, filter: &FeedbackFilter) -> Result<usize, StoreError>;

    /// Unique values of `field` across all records, sorted.
    async fn distinct(&self, field: FeedbackField) -> Result<Vec<String>, StoreError>;
}

/// Filter records given in insertion order and sort them newest first.
///
/// Records sharing a creation time keep reverse insertion order, so the most
/// recently stored one still comes first.
pub(crate) fn select(
    records: &[FeedbackRecord],
    filter: &FeedbackFilter,
    limit: Option<usize>,
) -> Vec<FeedbackRecord> {
    let mut matched: Vec<FeedbackRecord> = records
        .iter()
        .rev()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = limit {
        matched.truncate(limit);
    }
    matched
}

pub(crate) fn count(records: &[FeedbackRecord], filter: &FeedbackFilter) -> usize {
    records.iter().filter(|record| filter.matches(record)).count()
}

pub(crate) fn distinct(records: &[FeedbackRecord], field: FeedbackField) -> Vec<String> {
    records
        .iter()
        .map(|record| field.value_of(record))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
