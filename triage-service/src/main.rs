use triage_service::config::TriageConfig;
use triage_service::services::init_metrics;
use triage_service::startup::Application;

use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is read by the shared config loader before any service keys.
    let config = TriageConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("triage-service", "info", config.otlp_endpoint.as_deref());
    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!(
        port = app.port(),
        openai_available = app.state().triage.model_available(),
        "Triage service starting"
    );

    app.run_until_stopped().await?;

    Ok(())
}
