#![allow(dead_code)]

use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use triage_service::config::{CorsConfig, OpenAiConfig, StorageConfig, TriageConfig};
use triage_service::services::init_metrics;
use triage_service::startup::Application;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub conversations_file: PathBuf,
    pub client: reqwest::Client,
    // Keeps the log directory alive for the duration of the test.
    _dir: TempDir,
}

impl TestApp {
    /// Spawn with no model configured (keyword fallback only).
    pub async fn spawn() -> Self {
        Self::spawn_with_model(None).await
    }

    /// Spawn with the chat model pointed at `api_base`, typically a wiremock
    /// server.
    pub async fn spawn_with_model(api_base: Option<String>) -> Self {
        init_metrics();

        let dir = TempDir::new().expect("Failed to create temp dir");
        let conversations_file = dir.path().join("data").join("conversations.json");

        let openai = match api_base {
            Some(api_base) => OpenAiConfig {
                api_key: Some(Secret::new("test-key".to_string())),
                api_base,
                timeout_secs: 5,
                ..OpenAiConfig::default()
            },
            None => OpenAiConfig::default(),
        };

        let config = TriageConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            openai,
            storage: StorageConfig {
                conversations_file: conversations_file.clone(),
            },
            cors: CorsConfig {
                allowed_origins: vec![FRONTEND_ORIGIN.to_string()],
            },
            otlp_endpoint: None,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self {
            address,
            port,
            conversations_file,
            client,
            _dir: dir,
        }
    }

    pub async fn post_diagnose(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/diagnose", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Lines of the Prometheus exposition for the metric `name`.
    pub async fn metric_lines(&self, name: &str) -> Vec<String> {
        let text = self.get("/metrics").await.text().await.unwrap();
        let prefix = format!("{}{{", name);
        text.lines()
            .filter(|line| line.starts_with(&prefix))
            .map(str::to_string)
            .collect()
    }
}

/// An OpenAI-style completion body with the given assistant text.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 50, "completion_tokens": 20, "total_tokens": 70 }
    })
}
