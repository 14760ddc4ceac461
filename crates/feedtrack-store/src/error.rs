//! Error types for feedback stores.

/// Errors returned by feedback stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Backend could not be reached at all.
    #[error("store unreachable: {0}")]
    Unreachable(String),
}
