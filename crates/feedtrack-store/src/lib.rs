//! Feedback persistence: a durable JSONL store and the in-memory fallback.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

/// Store error type.
pub use error::StoreError;
/// JSONL file-backed store.
pub use file::FileFeedbackStore;
/// Process-lifetime fallback store.
pub use memory::MemoryFeedbackStore;
/// Store interface shared by every backend.
pub use store::FeedbackStore;
