//! Wire types shared by the FeedTrack server, client, and pipeline crates.

mod analysis;
mod analytics;
mod feedback;

pub use analysis::{Analysis, Category, InsightResult, OFFLINE_MARKER, Sentiment};
pub use analytics::{DistributionEntry, Metrics};
pub use feedback::{FeedbackDraft, FeedbackField, FeedbackFilter, FeedbackRecord, NewFeedback};
