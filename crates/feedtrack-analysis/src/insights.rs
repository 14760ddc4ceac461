//! Batch insight generation over recent feedback.

use crate::heuristic;
use crate::remote::{RemoteClassifier, StructuredOutput};
use feedtrack_protocol::{FeedbackRecord, InsightResult};
use log::{debug, warn};
use serde_json::{Value, json};
use std::sync::Arc;

impl StructuredOutput for InsightResult {
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "commonIssues": { "type": "ARRAY", "items": { "type": "STRING" } },
                "trends": { "type": "STRING" },
                "correctiveActions": { "type": "ARRAY", "items": { "type": "STRING" } },
                "suggestedResponse": { "type": "STRING" }
            },
            "required": ["commonIssues", "trends", "correctiveActions", "suggestedResponse"]
        })
    }
}

/// One line per record: `[SENTIMENT] text`.
pub fn insights_prompt(batch: &[FeedbackRecord]) -> String {
    let lines = batch
        .iter()
        .map(|record| format!("[{}] {}", record.analysis.sentiment, record.text))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Analyze these feedbacks and provide insights:\n{lines}")
}

/// Summarizes a batch of feedback for staff. Never fails.
///
/// The batch is used as given; callers decide how large a window to pass.
#[derive(Clone)]
pub struct InsightAggregator {
    remote: Arc<RemoteClassifier>,
}

impl InsightAggregator {
    pub fn new(remote: Arc<RemoteClassifier>) -> Self {
        Self { remote }
    }

    pub async fn summarize(&self, batch: &[FeedbackRecord]) -> InsightResult {
        if batch.is_empty() {
            debug!("no feedback to summarize");
            return InsightResult::insufficient_data();
        }

        match self
            .remote
            .request::<InsightResult>(&insights_prompt(batch))
            .await
        {
            Ok(success) => {
                debug!(
                    "insights produced remotely (model={}, batch={})",
                    success.model,
                    batch.len()
                );
                success.value
            }
            Err(err) => {
                warn!(
                    "falling back to heuristic insights (batch={}, reason={err})",
                    batch.len()
                );
                heuristic::summarize(batch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InsightAggregator, insights_prompt};
    use crate::fixtures::{QueuedTransport, json_reply, models, status};
    use crate::heuristic;
    use crate::remote::RemoteClassifier;
    use chrono::Utc;
    use feedtrack_protocol::{FeedbackDraft, FeedbackRecord, InsightResult, NewFeedback};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn record(text: &str) -> FeedbackRecord {
        let submission = NewFeedback {
            text: text.to_string(),
            student_id: "s-1".to_string(),
            student_name: "Asha".to_string(),
        };
        FeedbackDraft::new(submission, heuristic::classify(text))
            .into_record("1".to_string(), Utc::now())
    }

    fn aggregator(transport: Arc<QueuedTransport>) -> InsightAggregator {
        InsightAggregator::new(Arc::new(RemoteClassifier::new(
            transport,
            models(2),
            Some("key".to_string()),
        )))
    }

    #[tokio::test]
    async fn empty_batch_never_calls_remote() {
        let transport = Arc::new(QueuedTransport::default());
        let result = aggregator(transport.clone()).summarize(&[]).await;
        assert_eq!(result, InsightResult::insufficient_data());
        assert!(transport.models().is_empty());
    }

    #[test]
    fn prompt_tags_each_line_with_sentiment() {
        let prompt = insights_prompt(&[record("great lab"), record("worst mess")]);
        assert_eq!(
            prompt,
            "Analyze these feedbacks and provide insights:\n[POSITIVE] great lab\n[NEGATIVE] worst mess"
        );
    }

    #[tokio::test]
    async fn remote_result_is_returned_as_is() {
        let transport = Arc::new(QueuedTransport::new(vec![json_reply(json!({
            "commonIssues": ["Slow lab machines"],
            "trends": "Lab complaints rising",
            "correctiveActions": ["Upgrade PCs"],
            "suggestedResponse": "We are upgrading the lab."
        }))]));
        let result = aggregator(transport).summarize(&[record("lab is slow")]).await;
        assert_eq!(result.common_issues, vec!["Slow lab machines".to_string()]);
        assert_eq!(result.suggested_response, "We are upgrading the lab.");
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_heuristic_summary() {
        let batch = vec![record("good class"), record("bad fan")];
        let transport = Arc::new(QueuedTransport::new(vec![status(429), status(404)]));
        let result = aggregator(transport.clone()).summarize(&batch).await;

        assert_eq!(result, heuristic::summarize(&batch));
        assert!(result.trends.ends_with("Trend: Mixed Feedback"));
        assert_eq!(transport.models(), vec!["model-1", "model-2"]);
    }
}
