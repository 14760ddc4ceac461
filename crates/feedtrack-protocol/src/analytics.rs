//! Aggregate views returned to staff dashboards.

use serde::{Deserialize, Serialize};

/// Headline counters over all persisted feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_feedback: usize,
    pub unique_students: usize,
    pub critical_issues: usize,
    /// Share of positive feedback, rounded to a whole percent.
    pub positive_score: u8,
}

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub value: usize,
}
