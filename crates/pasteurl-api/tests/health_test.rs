//! Health, docs and middleware integration tests.

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_readiness_ok() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/ready").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");
}

#[tokio::test]
async fn test_readiness_fails_when_catalog_is_closed() {
    let app = setup_test_app().await;
    app.pool.close().await;

    let response = app.client().get("/health/ready").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "not_ready");
    assert_ne!(body["database"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    let request_id = response.header("x-request-id");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "trace-1234")
        .await;

    assert_eq!(response.header("x-request-id"), "trace-1234");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/upload"].is_object());
    assert!(body["paths"]["/image/{hash}"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get("/nope").await;

    assert_eq!(response.status_code(), 404);
}
