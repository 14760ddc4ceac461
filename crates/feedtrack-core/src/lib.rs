//! Feedback service shared by the server and the client's degraded mode.
//!
//! The service validates submissions, labels them through the analysis
//! pipeline, and persists through the durable store when it answers, or the
//! in-process fallback store when it does not.

pub mod analytics;
pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::FeedbackService;
