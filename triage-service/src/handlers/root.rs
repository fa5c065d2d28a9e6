use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Service banner, used by the frontend to check connectivity.
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Healthcare Chatbot API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/diagnose", "/history"],
        "openai_available": state.triage.model_available(),
    }))
}
