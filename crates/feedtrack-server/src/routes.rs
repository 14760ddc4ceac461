use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use feedtrack_protocol::{DistributionEntry, FeedbackRecord, InsightResult, Metrics, NewFeedback};
use log::debug;
use serde_json::{Value, json};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn create_feedback(
    State(state): State<AppState>,
    payload: Result<Json<NewFeedback>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackRecord>), ApiError> {
    let Json(submission) = payload?;
    let record = state.service.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn all_feedback(State(state): State<AppState>) -> ApiResult<Vec<FeedbackRecord>> {
    Ok(Json(state.service.list_all().await?))
}

pub async fn student_feedback(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Vec<FeedbackRecord>> {
    Ok(Json(state.service.list_for_student(&student_id).await?))
}

pub async fn generate_insights(State(state): State<AppState>) -> ApiResult<InsightResult> {
    Ok(Json(state.service.generate_insights().await?))
}

pub async fn metrics(State(state): State<AppState>) -> ApiResult<Metrics> {
    Ok(Json(state.service.metrics().await?))
}

pub async fn sentiment(State(state): State<AppState>) -> ApiResult<Vec<DistributionEntry>> {
    Ok(Json(state.service.sentiment_distribution().await?))
}

pub async fn category(State(state): State<AppState>) -> ApiResult<Vec<DistributionEntry>> {
    Ok(Json(state.service.category_distribution().await?))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "FeedTrack API is running", "timestamp": Utc::now() }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime": state.started.elapsed().as_secs_f64(),
        "durableStore": state.service.has_durable_store(),
    }))
}

pub async fn not_found(uri: axum::http::Uri) -> impl IntoResponse {
    debug!("no route matched (path={})", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
