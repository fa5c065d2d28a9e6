//! Integration tests for the service's probe and metadata endpoints.

mod common;

use common::{TestApp, FRONTEND_ORIGIN};
use serde_json::{json, Value};

#[tokio::test]
async fn health_check_returns_healthy() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "triage-service");
    assert_eq!(body["openai_configured"], false);
    assert_eq!(body["conversations_file_exists"], false);
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn health_check_sees_log_file_after_first_diagnosis() {
    let app = TestApp::spawn().await;

    app.post_diagnose(json!({ "symptoms": "slight cough" })).await;

    let body: Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(body["conversations_file_exists"], true);
    assert!(app.conversations_file.exists());
}

#[tokio::test]
async fn health_check_reports_configured_model() {
    let app = TestApp::spawn_with_model(Some("http://127.0.0.1:9".to_string())).await;

    let body: Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(body["openai_configured"], true);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Healthcare Chatbot API is running");
    assert_eq!(body["endpoints"], json!(["/diagnose", "/history"]));
    assert_eq!(body["openai_available"], false);
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = TestApp::spawn().await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn fallback_diagnosis_is_counted_in_metrics() {
    let app = TestApp::spawn().await;

    app.post_diagnose(json!({ "symptoms": "chest pain" })).await;

    let assessments = app.metric_lines("triage_assessments_total").await;
    assert!(
        assessments.iter().any(|line| line.contains(r#"severity="serious""#)
            && line.contains(r#"source="fallback""#)),
        "{assessments:?}"
    );
    let requests = app.metric_lines("http_requests_total").await;
    assert!(
        requests.iter().any(|line| line.contains(r#"method="POST""#)),
        "{requests:?}"
    );
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/does-not-exist").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("/does-not-exist"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "trace-me-123");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_preflight_allows_frontend_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/diagnose", app.address))
        .header("origin", FRONTEND_ORIGIN)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], FRONTEND_ORIGIN);
    assert_eq!(headers["access-control-allow-credentials"], "true");
}
