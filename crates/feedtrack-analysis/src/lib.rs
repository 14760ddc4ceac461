//! Feedback classification pipeline shared by the server and the client.
//!
//! The remote path asks a structured-generation service for labels, trying
//! each configured model in order. When that path is unavailable the keyword
//! heuristics in [`heuristic`] produce a result of the same shape, so callers
//! always get an answer.

pub mod analyzer;
pub mod error;
pub mod heuristic;
pub mod insights;
pub mod remote;
pub mod transport;

#[cfg(test)]
mod fixtures;

pub use analyzer::FeedbackAnalyzer;
pub use error::{ClassifyError, ModelFailure, ModelUnavailable, TransportError};
pub use insights::InsightAggregator;
pub use remote::{RemoteClassifier, RemoteSuccess, StructuredOutput};
pub use transport::{
    GenerateContentRequest, GenerateContentResponse, GenerationTransport, HttpGenerationTransport,
};
