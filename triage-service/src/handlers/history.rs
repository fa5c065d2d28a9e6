use crate::models::ConversationLog;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Full conversation log, oldest first.
#[tracing::instrument(skip(state))]
pub async fn get_history(State(state): State<AppState>) -> Json<ConversationLog> {
    let log = state.triage.store().load().await;
    tracing::debug!(entries = log.len(), "Returning conversation history");
    Json(log)
}
