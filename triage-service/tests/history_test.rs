//! Integration tests for `GET /history`.

mod common;

use common::TestApp;
use futures::future::join_all;
use serde_json::{json, Value};
use triage_service::services::classifier::DISCLAIMER;

#[tokio::test]
async fn history_is_empty_before_any_diagnosis() {
    let app = TestApp::spawn().await;

    let response = app.get("/history").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "conversations": [] }));
}

#[tokio::test]
async fn history_records_each_diagnosis_in_order() {
    let app = TestApp::spawn().await;

    app.post_diagnose(json!({ "symptoms": "runny nose" })).await;
    app.post_diagnose(json!({ "symptoms": "chest pain" })).await;

    let body: Value = app.get("/history").await.json().await.unwrap();
    let conversations = body["conversations"].as_array().unwrap();

    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0]["user"], "runny nose");
    assert_eq!(conversations[0]["severity"], "mild");
    assert_eq!(conversations[1]["user"], "chest pain");
    assert_eq!(conversations[1]["severity"], "serious");
    assert!(conversations[1]["response"]
        .as_str()
        .unwrap()
        .ends_with(DISCLAIMER));
    assert!(conversations[1]["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn history_file_matches_endpoint_output() {
    let app = TestApp::spawn().await;

    app.post_diagnose(json!({ "symptoms": "minor scrape on knee" })).await;

    let from_endpoint: Value = app.get("/history").await.json().await.unwrap();
    let raw = std::fs::read_to_string(&app.conversations_file).unwrap();
    let from_disk: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(from_endpoint, from_disk);
}

#[tokio::test]
async fn corrupt_log_file_reads_as_empty_history() {
    let app = TestApp::spawn().await;
    std::fs::create_dir_all(app.conversations_file.parent().unwrap()).unwrap();
    std::fs::write(&app.conversations_file, "not json at all").unwrap();

    let body: Value = app.get("/history").await.json().await.unwrap();

    assert_eq!(body, json!({ "conversations": [] }));
}

#[tokio::test]
async fn entries_written_elsewhere_are_kept_and_served_as_stored() {
    let app = TestApp::spawn().await;
    let existing = json!({
        "conversations": [
            { "user": "dizzy", "response": "sit down", "severity": "moderate", "timestamp": "2024-01-02T10:00:00.000001" }
        ],
        "exported_by": "frontend"
    });
    std::fs::create_dir_all(app.conversations_file.parent().unwrap()).unwrap();
    std::fs::write(&app.conversations_file, existing.to_string()).unwrap();

    app.post_diagnose(json!({ "symptoms": "runny nose" })).await;

    let body: Value = app.get("/history").await.json().await.unwrap();
    let conversations = body["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0], existing["conversations"][0]);
    assert_eq!(conversations[1]["user"], "runny nose");
    assert_eq!(body["exported_by"], "frontend");
}

#[tokio::test]
async fn concurrent_diagnoses_are_all_recorded() {
    let app = TestApp::spawn().await;

    let requests = (0..8).map(|i| {
        let app = &app;
        async move {
            app.post_diagnose(json!({ "symptoms": format!("slight ache {}", i) }))
                .await
        }
    });
    for response in join_all(requests).await {
        assert_eq!(response.status().as_u16(), 200);
    }

    let body: Value = app.get("/history").await.json().await.unwrap();
    assert_eq!(body["conversations"].as_array().unwrap().len(), 8);
}
