//! Durable store appending one JSON record per line.

use crate::error::StoreError;
use crate::store::{self, FeedbackStore};
use async_trait::async_trait;
use chrono::Utc;
use feedtrack_protocol::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord};
use log::{debug, info};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FEEDBACK_FILE: &str = "feedback.jsonl";

/// JSONL-backed feedback store with uuid identities.
pub struct FileFeedbackStore {
    /// Directory holding the feedback log.
    root: PathBuf,
    /// Serialize appends to the log.
    write_lock: Mutex<()>,
}

impl FileFeedbackStore {
    /// Create a store under `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized file feedback store (root={})", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(FEEDBACK_FILE)
    }

    /// Read every record in insertion order.
    fn load_records(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = OpenOptions::new().read(true).open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    fn append(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for FileFeedbackStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn create(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, StoreError> {
        let record = draft.into_record(Uuid::new_v4().to_string(), Utc::now());
        self.append(&record)?;
        debug!(
            "stored feedback record (id={}, student_id={}, text_len={})",
            record.id,
            record.student_id,
            record.text.len()
        );
        Ok(record)
    }

    async fn list(
        &self,
        filter: &FeedbackFilter,
        limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let records = self.load_records()?;
        Ok(store::select(&records, filter, limit))
    }

    async fn count(&self, filter: &FeedbackFilter) -> Result<usize, StoreError> {
        let records = self.load_records()?;
        Ok(store::count(&records, filter))
    }

    async fn distinct(&self, field: FeedbackField) -> Result<Vec<String>, StoreError> {
        let records = self.load_records()?;
        Ok(store::distinct(&records, field))
    }
}

#[cfg(test)]
mod tests {
    use super::FileFeedbackStore;
    use crate::error::StoreError;
    use crate::store::FeedbackStore;
    use feedtrack_protocol::{
        Analysis, Category, FeedbackDraft, FeedbackField, FeedbackFilter, NewFeedback, Sentiment,
    };
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn draft(student_id: &str, text: &str, category: Category) -> FeedbackDraft {
        let submission = NewFeedback {
            text: text.to_string(),
            student_id: student_id.to_string(),
            student_name: "Ravi".to_string(),
        };
        let analysis = Analysis {
            sentiment: Sentiment::Negative,
            category,
            confidence: 75,
            highlights: vec!["slow".to_string()],
            summary: "Slow lab machines.".to_string(),
        };
        FeedbackDraft::new(submission, analysis)
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let temp = tempdir().expect("tempdir");
        let created = {
            let store = FileFeedbackStore::new(temp.path()).expect("store");
            store
                .create(draft("s-1", "lab pcs are slow", Category::Labs))
                .await
                .expect("create")
        };
        assert!(Uuid::parse_str(&created.id).is_ok());

        let reopened = FileFeedbackStore::new(temp.path()).expect("store");
        let listed = reopened
            .list(&FeedbackFilter::all(), None)
            .await
            .expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn list_count_and_distinct_read_the_log() {
        let temp = tempdir().expect("tempdir");
        let store = FileFeedbackStore::new(temp.path().join("nested")).expect("store");
        store
            .create(draft("s-1", "lab", Category::Labs))
            .await
            .expect("create");
        store
            .create(draft("s-2", "mess", Category::Hostel))
            .await
            .expect("create");
        store
            .create(draft("s-1", "exam", Category::Exams))
            .await
            .expect("create");

        let mine = store
            .list(&FeedbackFilter::student("s-1"), None)
            .await
            .expect("list");
        let texts: Vec<&str> = mine.iter().map(|record| record.text.as_str()).collect();
        assert_eq!(texts, vec!["exam", "lab"]);

        assert_eq!(
            store
                .count(&FeedbackFilter::category(Category::Hostel))
                .await
                .expect("count"),
            1
        );
        assert_eq!(
            store
                .distinct(FeedbackField::Category)
                .await
                .expect("distinct"),
            vec!["Exams".to_string(), "Hostel".to_string(), "Labs".to_string()]
        );
    }

    #[tokio::test]
    async fn corrupt_line_is_a_serde_error() {
        let temp = tempdir().expect("tempdir");
        let store = FileFeedbackStore::new(temp.path()).expect("store");
        std::fs::write(store.path(), "{not json}\n").expect("write");

        let err = store.list(&FeedbackFilter::all(), None).await.unwrap_err();
        assert!(matches!(err, StoreError::Serde(_)));
    }
}
