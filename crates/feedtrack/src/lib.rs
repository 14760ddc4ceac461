//! Public surface for FeedTrack.
//!
//! Re-exports the workspace crates and provides a logging helper so the
//! binary and embedders set up output the same way.

/// Re-export for convenience.
pub use feedtrack_analysis as analysis;
pub use feedtrack_client as client;
pub use feedtrack_config as config;
pub use feedtrack_core as core;
/// Re-export for convenience.
pub use feedtrack_protocol as protocol;
pub use feedtrack_server as server;
pub use feedtrack_store as store;

#[inline]
/// Initialize env_logger with millisecond timestamps, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
