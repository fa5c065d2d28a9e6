use crate::models::{DiagnosisResponse, SymptomRequest};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

#[tracing::instrument(skip(state, request))]
pub async fn diagnose(
    State(state): State<AppState>,
    Json(request): Json<SymptomRequest>,
) -> Result<Json<DiagnosisResponse>, AppError> {
    request.validate()?;

    let diagnosis = state.triage.diagnose(&request.symptoms).await;

    Ok(Json(DiagnosisResponse {
        advice: diagnosis.advice,
        severity: diagnosis.severity,
        timestamp: diagnosis.timestamp,
    }))
}
