//! Single-item analysis: remote classification with heuristic fallback.

use crate::heuristic;
use crate::remote::{RemoteClassifier, StructuredOutput};
use feedtrack_protocol::{Analysis, Category, Sentiment};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shape the remote service is asked to return for one feedback item.
///
/// Every field is required; a payload missing any of them is treated as a
/// malformed response for that model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteAnalysis {
    pub category: String,
    pub sentiment: String,
    pub confidence: f64,
    pub highlights: Vec<String>,
    pub summary: String,
}

impl StructuredOutput for RemoteAnalysis {
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "description": "Category: Teaching, Facilities, Exams, Labs, Hostel, Others"
                },
                "sentiment": {
                    "type": "STRING",
                    "description": "Sentiment: Positive, Neutral, Negative"
                },
                "confidence": { "type": "NUMBER", "description": "Score 0-100" },
                "highlights": { "type": "ARRAY", "items": { "type": "STRING" } },
                "summary": { "type": "STRING" }
            },
            "required": ["category", "sentiment", "confidence", "highlights", "summary"]
        })
    }
}

impl RemoteAnalysis {
    /// Map loosely-typed labels onto the fixed label sets.
    pub fn normalize(self) -> Analysis {
        Analysis {
            sentiment: Sentiment::parse_loose(&self.sentiment).unwrap_or_default(),
            category: Category::parse_loose(&self.category).unwrap_or_default(),
            confidence: clamp_confidence(self.confidence),
            highlights: self.highlights,
            summary: self.summary,
        }
    }
}

fn clamp_confidence(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

pub fn analysis_prompt(text: &str) -> String {
    format!("Analyze this feedback: \"{text}\"")
}

/// Labels feedback text. Never fails: any remote failure degrades to
/// [`heuristic::classify`].
#[derive(Clone)]
pub struct FeedbackAnalyzer {
    remote: Arc<RemoteClassifier>,
}

impl FeedbackAnalyzer {
    pub fn new(remote: Arc<RemoteClassifier>) -> Self {
        Self { remote }
    }

    pub async fn analyze(&self, text: &str) -> Analysis {
        match self
            .remote
            .request::<RemoteAnalysis>(&analysis_prompt(text))
            .await
        {
            Ok(success) => {
                debug!("analysis produced remotely (model={})", success.model);
                success.value.normalize()
            }
            Err(err) => {
                warn!("falling back to heuristic analysis (reason={err})");
                heuristic::classify(text)
            }
        }
    }
}
