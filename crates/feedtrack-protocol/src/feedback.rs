//! Feedback records and store query types.

use crate::analysis::{Analysis, Category, Sentiment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound submission from a student. Missing or `null` fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub student_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub student_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Analyzed feedback that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub student_id: String,
    pub student_name: String,
    pub text: String,
    pub analysis: Analysis,
    pub is_critical: bool,
}

impl FeedbackDraft {
    /// Build a draft from a submission and its analysis.
    pub fn new(submission: NewFeedback, analysis: Analysis) -> Self {
        Self {
            student_id: submission.student_id,
            student_name: submission.student_name,
            text: submission.text,
            analysis,
            is_critical: false,
        }
    }

    /// Finalize into a record with store-assigned identity.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> FeedbackRecord {
        FeedbackRecord {
            id,
            student_id: self.student_id,
            student_name: self.student_name,
            text: self.text,
            created_at,
            analysis: self.analysis,
            is_critical: self.is_critical,
        }
    }
}

/// Persisted feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Store-assigned identifier.
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub analysis: Analysis,
    #[serde(default)]
    pub is_critical: bool,
}

/// Exact-match filter over feedback records. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackFilter {
    pub student_id: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub category: Option<Category>,
    pub is_critical: Option<bool>,
}

impl FeedbackFilter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching one student's records.
    pub fn student(student_id: impl Into<String>) -> Self {
        Self {
            student_id: Some(student_id.into()),
            ..Self::default()
        }
    }

    pub fn sentiment(sentiment: Sentiment) -> Self {
        Self {
            sentiment: Some(sentiment),
            ..Self::default()
        }
    }

    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn critical() -> Self {
        Self {
            is_critical: Some(true),
            ..Self::default()
        }
    }

    /// Check a record against every set field.
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(student_id) = &self.student_id
            && &record.student_id != student_id
        {
            return false;
        }
        if let Some(sentiment) = self.sentiment
            && record.analysis.sentiment != sentiment
        {
            return false;
        }
        if let Some(category) = self.category
            && record.analysis.category != category
        {
            return false;
        }
        if let Some(is_critical) = self.is_critical
            && record.is_critical != is_critical
        {
            return false;
        }
        true
    }
}

/// Record field addressable by distinct-value queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackField {
    StudentId,
    Sentiment,
    Category,
}

impl FeedbackField {
    /// Extract this field's value from a record as a string.
    pub fn value_of(self, record: &FeedbackRecord) -> String {
        match self {
            FeedbackField::StudentId => record.student_id.clone(),
            FeedbackField::Sentiment => record.analysis.sentiment.as_str().to_string(),
            FeedbackField::Category => record.analysis.category.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord, NewFeedback};
    use crate::{Analysis, Category, Sentiment};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(student_id: &str, sentiment: Sentiment) -> FeedbackRecord {
        let submission = NewFeedback {
            text: "the lab is fine".to_string(),
            student_id: student_id.to_string(),
            student_name: "Asha".to_string(),
        };
        let analysis = Analysis {
            sentiment,
            category: Category::Labs,
            confidence: 60,
            highlights: Vec::new(),
            summary: String::new(),
        };
        FeedbackDraft::new(submission, analysis).into_record("1".to_string(), Utc::now())
    }

    #[test]
    fn filter_matches_exact_fields() {
        let record = record("s-1", Sentiment::Positive);
        assert!(FeedbackFilter::all().matches(&record));
        assert!(FeedbackFilter::student("s-1").matches(&record));
        assert!(!FeedbackFilter::student("s-10").matches(&record));
        assert!(FeedbackFilter::sentiment(Sentiment::Positive).matches(&record));
        assert!(!FeedbackFilter::sentiment(Sentiment::Negative).matches(&record));
        assert!(!FeedbackFilter::critical().matches(&record));
        assert!(FeedbackFilter::category(Category::Labs).matches(&record));
    }

    #[test]
    fn field_values_use_wire_names() {
        let record = record("s-2", Sentiment::Negative);
        assert_eq!(FeedbackField::StudentId.value_of(&record), "s-2");
        assert_eq!(FeedbackField::Sentiment.value_of(&record), "NEGATIVE");
        assert_eq!(FeedbackField::Category.value_of(&record), "Labs");
    }

    #[test]
    fn new_feedback_accepts_camel_case_and_missing_ids() {
        let parsed: NewFeedback =
            serde_json::from_value(json!({ "text": "hello", "studentName": "Ravi" }))
                .expect("parse");
        assert_eq!(parsed.text, "hello");
        assert_eq!(parsed.student_name, "Ravi");
        assert_eq!(parsed.student_id, "");
    }

    #[test]
    fn new_feedback_reads_null_fields_as_empty() {
        let body = json!({ "text": null, "studentId": null, "studentName": "Ravi" });
        let parsed: NewFeedback = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.text, "");
        assert_eq!(parsed.student_id, "");
        assert_eq!(parsed.student_name, "Ravi");
    }
}
