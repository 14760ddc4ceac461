//! Test helpers shared across FeedTrack crates.

pub mod store;
pub mod transport;

pub use store::UnreachableStore;
pub use transport::{ScriptedReply, ScriptedTransport};
