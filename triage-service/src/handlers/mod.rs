//! HTTP handlers for the triage service.

pub mod diagnose;
pub mod health;
pub mod history;
pub mod root;

use axum::http::Uri;
use service_core::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
