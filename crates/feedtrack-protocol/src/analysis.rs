//! Classification labels and analysis payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker embedded in heuristic output so consumers can tell it apart from
/// remote classification results.
pub const OFFLINE_MARKER: &str = "[Offline]";

/// Overall tone of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every sentiment in declaration order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Upper-case wire name (`POSITIVE`).
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }

    /// Title-case label used in human-readable summaries (`Positive`).
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace.
    pub fn parse_loose(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject area a feedback entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Teaching,
    Facilities,
    Exams,
    Labs,
    Hostel,
    #[default]
    Others,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Teaching,
        Category::Facilities,
        Category::Exams,
        Category::Labs,
        Category::Hostel,
        Category::Others,
    ];

    /// Wire name (`Labs`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Teaching => "Teaching",
            Category::Facilities => "Facilities",
            Category::Exams => "Exams",
            Category::Labs => "Labs",
            Category::Hostel => "Hostel",
            Category::Others => "Others",
        }
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace.
    pub fn parse_loose(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels attached to a feedback entry when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub category: Category,
    /// Score in 0..=100.
    pub confidence: u8,
    pub highlights: Vec<String>,
    pub summary: String,
}

impl Analysis {
    /// True when the labels came from the offline keyword heuristic.
    pub fn is_offline(&self) -> bool {
        self.summary.starts_with(OFFLINE_MARKER)
    }
}

/// Staff-facing trend summary over a batch of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub common_issues: Vec<String>,
    pub trends: String,
    pub corrective_actions: Vec<String>,
    pub suggested_response: String,
}

impl InsightResult {
    /// Canned result returned when there is nothing to summarize.
    pub fn insufficient_data() -> Self {
        Self {
            common_issues: vec!["No feedback data available".to_string()],
            trends: "Insufficient data to generate trends.".to_string(),
            corrective_actions: Vec::new(),
            suggested_response: "Please wait for students to submit feedback.".to_string(),
        }
    }
}
