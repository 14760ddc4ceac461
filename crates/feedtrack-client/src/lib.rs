//! Client for the FeedTrack server with a local degraded mode.
//!
//! Every call goes to the server first. When the server cannot be reached or
//! answers with a non-success status, the same analysis and storage chain
//! runs in-process against a store owned by this client.

pub mod client;
pub mod error;

pub use client::{FeedTrackClient, Served, Source};
pub use error::ClientError;
