//! HTTP surface over the feedback service.

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use feedtrack_core::FeedbackService;
use log::{info, warn};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedbackService>,
    pub started: Instant,
}

impl AppState {
    pub fn new(service: Arc<FeedbackService>) -> Self {
        Self {
            service,
            started: Instant::now(),
        }
    }
}

/// Build the application router. Request bodies larger than
/// `body_limit_bytes` are rejected before reaching a handler.
pub fn router(service: Arc<FeedbackService>, body_limit_bytes: usize) -> Router {
    let api = Router::new()
        .route("/feedback", post(routes::create_feedback))
        .route("/feedback/all", get(routes::all_feedback))
        .route("/feedback/student/{student_id}", get(routes::student_feedback))
        .route("/insights", post(routes::generate_insights))
        .route("/insights/generate", post(routes::generate_insights))
        .route("/analytics/metrics", get(routes::metrics))
        .route("/analytics/sentiment", get(routes::sentiment))
        .route("/analytics/category", get(routes::category));

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(AppState::new(service))
}

/// Serve until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("feedtrack server listening (addr={addr})");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c, shutting down"),
        Err(err) => warn!("failed to listen for ctrl-c (reason={err})"),
    }
}
