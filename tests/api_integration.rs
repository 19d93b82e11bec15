//! Integration tests for the HTTP API
//!
//! The router's state is shared between clones, so one router can be driven
//! through a whole refresh sequence.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use deskwatch::core::create_router;
use deskwatch::DeskConfig;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

fn create_test_router() -> (TempDir, DeskConfig, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = DeskConfig {
        input_path: dir.path().join("data/new_input.json"),
        log_path: dir.path().join("data/log.json"),
        score_output_path: dir.path().join("input/score_output.json"),
        max_history: 2,
        ..DeskConfig::default()
    };
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    let router = create_router(config.clone());
    (dir, config, router)
}

fn write_snapshot(config: &DeskConfig, timestamp: &str, score: u32) {
    let json = format!(
        r#"{{"score": {}, "timestamp": "{}", "image_width": 480, "image_height": 640,
            "objects": [{{"x": 10, "y": 20, "width": 30, "height": 40}}]}}"#,
        score, timestamp
    );
    std::fs::write(&config.input_path, json).unwrap();
}

async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _config, app) = create_test_router();
    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_log_not_found_before_first_update() {
    let (_dir, _config, app) = create_test_router();
    let (status, json) = send(&app, "GET", "/log").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_refresh_without_input() {
    let (_dir, _config, app) = create_test_router();
    let (status, json) = send(&app, "POST", "/refresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], false);
    assert_eq!(json["reason"], "U002_INPUT_MISSING");
}

#[tokio::test]
async fn test_refresh_flow() {
    let (_dir, config, app) = create_test_router();

    write_snapshot(&config, "2025-06-06 14:10", 42);
    let (status, json) = send(&app, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], true);
    assert_eq!(json["state"]["image_width"], 640);
    assert_eq!(json["state"]["objects"][0]["y"], 440);

    // Same snapshot again
    let (status, json) = send(&app, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], false);
    assert_eq!(json["reason"], "U003_ALREADY_UP_TO_DATE");

    for (ts, score) in [("2025-06-06 14:20", 50), ("2025-06-06 14:30", 60)] {
        write_snapshot(&config, ts, score);
        let (_, json) = send(&app, "POST", "/refresh").await;
        assert_eq!(json["accepted"], true);
    }

    let (status, log) = send(&app, "GET", "/log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["timestamp"], "2025-06-06 14:30");
    let history = log["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["timestamp"], "2025-06-06 14:20");
    assert_eq!(history[1]["timestamp"], "2025-06-06 14:30");
}

#[tokio::test]
async fn test_refresh_malformed_input() {
    let (_dir, config, app) = create_test_router();
    std::fs::write(&config.input_path, r#"{"score": "lots"}"#).unwrap();

    let (status, json) = send(&app, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["reason"], "U004_MALFORMED_INPUT");
}

#[tokio::test]
async fn test_corrupt_log_reported() {
    let (_dir, config, app) = create_test_router();
    std::fs::write(&config.log_path, "not json").unwrap();

    let (status, _) = send(&app, "GET", "/log").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    write_snapshot(&config, "t1", 10);
    let (status, json) = send(&app, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["reason"], "U005_STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_concurrent_refreshes_record_once() {
    let (_dir, config, app) = create_test_router();
    write_snapshot(&config, "2025-06-06 15:00", 30);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { send(&app, "POST", "/refresh").await }));
    }

    let mut accepted = 0;
    for handle in handles {
        let (_, json) = handle.await.unwrap();
        if json["accepted"] == true {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);

    let (_, log) = send(&app, "GET", "/log").await;
    assert_eq!(log["history"].as_array().unwrap().len(), 1);
}
