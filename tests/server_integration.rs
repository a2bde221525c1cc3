//! HTTP endpoint tests, driven in-process with `tower::ServiceExt`.

// Integration tests use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use credeq::config::EngineConfig;
use credeq::server::router;
use credeq::services::{AnalysisService, LexicalScorer};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> axum::Router {
    let mut config = EngineConfig::default();
    config.llm.enabled = false;
    let service =
        AnalysisService::from_config(&config).with_scorer(Arc::new(LexicalScorer::new()));
    router(Arc::new(service))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_analyze(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_rejects_missing_subject_name() {
    let payload = json!({
        "subject_name": "",
        "applicant_files": ["/tmp/a.txt"],
        "sunway_files": ["/tmp/b.txt"],
    });

    let response = app().oneshot(post_analyze(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("subject_name"));
}

#[tokio::test]
async fn analyze_rejects_empty_file_lists() {
    let payload = json!({
        "subject_name": "Computer Mathematics",
        "applicant_files": [],
        "sunway_files": [],
    });

    let response = app().oneshot(post_analyze(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("applicant_files"));
}

#[tokio::test]
async fn analyze_full_flow_over_http() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("transcript.txt");
    let syllabus = dir.path().join("syllabus.txt");
    let target = dir.path().join("target.txt");

    std::fs::write(
        &transcript,
        "MTH1114 Computer Mathematics 4 3.50 A+\nCSC1024 Programming Principles 4 4.00 A\n",
    )
    .unwrap();
    let syllabus_text = "Course Description\nComputer Mathematics\nCredits: 4\nTopics: sets, logic, graph theory\n";
    std::fs::write(&syllabus, syllabus_text).unwrap();
    std::fs::write(&target, syllabus_text).unwrap();

    let payload = json!({
        "type": "Credit Transfer",
        "subject_name": "Computer Mathematics",
        "applicant_files": [transcript, syllabus],
        "sunway_files": [target],
    });

    let response = app().oneshot(post_analyze(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ai_decision"], "approve");
    assert_eq!(body["type"], "Credit Transfer");
    assert_eq!(body["reasoning"]["detected_grade"], "A+");
    assert_eq!(body["reasoning"]["detected_credit_hours"], 4);
    assert_eq!(body["reasoning"]["similarity_ok"], true);
    assert_eq!(body["suggested_equivalent_grade"], "A+");
}

#[tokio::test]
async fn analyze_classification_failure_is_400() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("transcript.txt");
    std::fs::write(&transcript, "MTH1114 Computer Mathematics 4 3.50 A+\n").unwrap();

    let payload = json!({
        "subject_name": "Computer Mathematics",
        "applicant_files": [transcript],
        "sunway_files": [transcript],
    });

    let response = app().oneshot(post_analyze(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("syllabus"));
}
