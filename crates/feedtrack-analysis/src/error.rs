//! Error types for the remote classification path.
//!
//! None of these reach a feedback submitter: the analyzer and aggregator
//! absorb them and fall back to heuristics.

use thiserror::Error;

/// Failure talking to the generation endpoint for one model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Endpoint answered with a non-success status.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection or protocol failure.
    #[error("request failed: {0}")]
    Request(String),
    /// Response body was not a generation response.
    #[error("undecodable response: {0}")]
    Decode(String),
}

impl TransportError {
    /// The credential itself was refused; other models share it.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, TransportError::Status { status: 401 | 403, .. })
    }
}

/// Why a single model identifier produced no usable result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelUnavailable {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// First candidate had no text payload.
    #[error("empty response")]
    EmptyResponse,
    /// Payload did not match the requested structure.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// A recorded per-model failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    pub model: String,
    pub reason: ModelUnavailable,
}

/// Terminal failure of the whole remote path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// No API key configured; no request was attempted.
    #[error("classification credential missing")]
    CredentialMissing,
    /// The endpoint refused the credential; remaining models were skipped.
    #[error("classification credential rejected by {}", last_model(.failures))]
    CredentialRejected { failures: Vec<ModelFailure> },
    /// Every configured model failed.
    #[error("all models exhausted ({} attempts)", .failures.len())]
    AllModelsExhausted { failures: Vec<ModelFailure> },
}

impl ClassifyError {
    /// Per-model failures recorded before giving up.
    pub fn failures(&self) -> &[ModelFailure] {
        match self {
            ClassifyError::CredentialMissing => &[],
            ClassifyError::CredentialRejected { failures }
            | ClassifyError::AllModelsExhausted { failures } => failures,
        }
    }
}

fn last_model(failures: &[ModelFailure]) -> &str {
    failures
        .last()
        .map(|failure| failure.model.as_str())
        .unwrap_or("unknown model")
}
