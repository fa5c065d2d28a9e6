use crate::models::local_timestamp;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Reports whether the model client is configured and
/// whether the conversation log exists yet.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "triage-service",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": local_timestamp(),
            "openai_configured": state.triage.model_available(),
            "conversations_file_exists": state.triage.store().exists().await,
        })),
    )
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
