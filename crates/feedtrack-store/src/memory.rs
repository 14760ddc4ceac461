//! Process-lifetime in-memory store used when the durable store is down.

use crate::error::StoreError;
use crate::store::{self, FeedbackStore};
use async_trait::async_trait;
use chrono::Utc;
use feedtrack_protocol::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord};
use log::debug;
use parking_lot::RwLock;

#[derive(Default)]
struct MemoryState {
    /// Records in insertion order.
    records: Vec<FeedbackRecord>,
    /// Last id handed out, in epoch milliseconds.
    last_id: i64,
}

/// Insertion-ordered record collection with timestamp-derived ids.
///
/// Nothing is persisted; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryFeedbackStore {
    state: RwLock<MemoryState>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, StoreError> {
        let created_at = Utc::now();
        let mut state = self.state.write();
        // Millisecond clock, bumped so ids stay unique within one tick.
        let id = created_at.timestamp_millis().max(state.last_id + 1);
        state.last_id = id;
        let record = draft.into_record(id.to_string(), created_at);
        state.records.push(record.clone());
        debug!(
            "stored feedback in memory (id={}, student_id={}, total={})",
            record.id,
            record.student_id,
            state.records.len()
        );
        Ok(record)
    }

    async fn list(
        &self,
        filter: &FeedbackFilter,
        limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        Ok(store::select(&self.state.read().records, filter, limit))
    }

    async fn count(&self, filter: &FeedbackFilter) -> Result<usize, StoreError> {
        Ok(store::count(&self.state.read().records, filter))
    }

    async fn distinct(&self, field: FeedbackField) -> Result<Vec<String>, StoreError> {
        Ok(store::distinct(&self.state.read().records, field))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryFeedbackStore;
    use crate::store::FeedbackStore;
    use feedtrack_protocol::{
        Analysis, Category, FeedbackDraft, FeedbackField, FeedbackFilter, NewFeedback, Sentiment,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn draft(student_id: &str, text: &str, sentiment: Sentiment) -> FeedbackDraft {
        let submission = NewFeedback {
            text: text.to_string(),
            student_id: student_id.to_string(),
            student_name: format!("Student {student_id}"),
        };
        let analysis = Analysis {
            sentiment,
            category: Category::Others,
            confidence: 60,
            highlights: Vec::new(),
            summary: "[Offline] test".to_string(),
        };
        FeedbackDraft::new(submission, analysis)
    }

    #[tokio::test]
    async fn created_records_are_listed_newest_first_with_unique_ids() {
        let store = MemoryFeedbackStore::new();
        for idx in 0..5 {
            store
                .create(draft("s-1", &format!("entry {idx}"), Sentiment::Neutral))
                .await
                .expect("create");
        }

        let listed = store.list(&FeedbackFilter::all(), None).await.expect("list");
        assert_eq!(listed.len(), 5);
        let texts: Vec<&str> = listed.iter().map(|record| record.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["entry 4", "entry 3", "entry 2", "entry 1", "entry 0"]
        );
        let ids: HashSet<&str> = listed.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(
            listed
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
    }

    #[tokio::test]
    async fn ids_are_numeric_and_increasing() {
        let store = MemoryFeedbackStore::new();
        let first = store
            .create(draft("s-1", "a", Sentiment::Neutral))
            .await
            .expect("create");
        let second = store
            .create(draft("s-1", "b", Sentiment::Neutral))
            .await
            .expect("create");
        let first: i64 = first.id.parse().expect("numeric id");
        let second: i64 = second.id.parse().expect("numeric id");
        assert!(second > first);
    }

    #[tokio::test]
    async fn student_filter_keeps_order_among_matches() {
        let store = MemoryFeedbackStore::new();
        for (student, text) in [("x", "one"), ("y", "two"), ("x", "three"), ("xx", "four")] {
            store
                .create(draft(student, text, Sentiment::Neutral))
                .await
                .expect("create");
        }

        let listed = store
            .list(&FeedbackFilter::student("x"), None)
            .await
            .expect("list");
        let texts: Vec<&str> = listed.iter().map(|record| record.text.as_str()).collect();
        assert_eq!(texts, vec!["three", "one"]);
        assert!(listed.iter().all(|record| record.student_id == "x"));
    }

    #[tokio::test]
    async fn count_and_distinct() {
        let store = MemoryFeedbackStore::new();
        store
            .create(draft("a", "good", Sentiment::Positive))
            .await
            .expect("create");
        store
            .create(draft("b", "bad", Sentiment::Negative))
            .await
            .expect("create");
        store
            .create(draft("a", "great", Sentiment::Positive))
            .await
            .expect("create");

        assert_eq!(store.count(&FeedbackFilter::all()).await.expect("count"), 3);
        assert_eq!(
            store
                .count(&FeedbackFilter::sentiment(Sentiment::Positive))
                .await
                .expect("count"),
            2
        );
        assert_eq!(
            store
                .distinct(FeedbackField::StudentId)
                .await
                .expect("distinct"),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryFeedbackStore::new();
        assert!(store.is_empty());
        assert!(
            store
                .list(&FeedbackFilter::all(), Some(10))
                .await
                .expect("list")
                .is_empty()
        );
        assert_eq!(store.count(&FeedbackFilter::critical()).await.expect("count"), 0);
    }
}
