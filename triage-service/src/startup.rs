//! Application startup and lifecycle management.

use crate::config::TriageConfig;
use crate::handlers::{
    diagnose::diagnose,
    health::{health_check, metrics_endpoint},
    history::get_history,
    not_found,
    root::index,
};
use crate::services::providers::openai::OpenAiChatModel;
use crate::services::providers::{ChatModel, GenerationParams};
use crate::services::{ConversationStore, TriageService};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer,
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TriageConfig,
    pub triage: TriageService,
}

impl AppState {
    /// Wire the triage pipeline from configuration. The model client is only
    /// built when an API key is present.
    pub fn from_config(config: TriageConfig) -> Result<Self, AppError> {
        let model: Option<Arc<dyn ChatModel>> = OpenAiChatModel::from_config(&config.openai)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?
            .map(|m| Arc::new(m) as Arc<dyn ChatModel>);

        match &model {
            Some(m) => tracing::info!(model = m.model_name(), "Initialized chat model client"),
            None => tracing::warn!(
                "OPENAI_API_KEY not configured - serving keyword fallback advice only"
            ),
        }

        let store = ConversationStore::new(config.storage.conversations_file.clone());
        tracing::info!(
            path = %store.path().display(),
            "Conversations will be stored on disk"
        );

        let params = GenerationParams {
            max_tokens: config.openai.max_tokens,
            temperature: config.openai.temperature,
        };

        Ok(Self {
            config,
            triage: TriageService::new(model, store, params),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(index))
        .route("/diagnose", post(diagnose))
        .route("/history", get(get_history))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found)
        .with_state(state)
        // Add metrics middleware
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        // Add security headers middleware
        .layer(from_fn(security_headers_middleware))
        // Add CORS layer
        .layer(cors)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: TriageConfig) -> Result<Self, AppError> {
        let address = config.common.address();
        let state = AppState::from_config(config)?;

        // Bind HTTP listener (port 0 = random port for testing)
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Triage service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
