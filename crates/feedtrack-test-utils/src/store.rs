use async_trait::async_trait;
use feedtrack_protocol::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord};
use feedtrack_store::{FeedbackStore, StoreError};
use parking_lot::Mutex;

/// Durable-store stand-in that fails every operation.
#[derive(Debug, Default)]
pub struct UnreachableStore {
    attempts: Mutex<usize>,
}

impl UnreachableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted against this store.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        *self.attempts.lock() += 1;
        Err(StoreError::Unreachable("connection refused".to_string()))
    }
}

#[async_trait]
impl FeedbackStore for UnreachableStore {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn create(&self, _draft: FeedbackDraft) -> Result<FeedbackRecord, StoreError> {
        self.fail()
    }

    async fn list(
        &self,
        _filter: &FeedbackFilter,
        _limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        self.fail()
    }

    async fn count(&self, _filter: &FeedbackFilter) -> Result<usize, StoreError> {
        self.fail()
    }

    async fn distinct(&self, _field: FeedbackField) -> Result<Vec<String>, StoreError> {
        self.fail()
    }
}
