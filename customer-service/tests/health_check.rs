mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use customer_service::services::init_metrics;
use service_core::middleware::tracing::REQUEST_ID_HEADER;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::in_memory();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "customer-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::in_memory();

    let response = app.get("/ready").await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    init_metrics();
    let app = TestApp::in_memory();
    app.get("/customers").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.content_type.clone().expect("Missing content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text();
    assert!(
        body.is_empty() || body.contains('#') || body.contains('_'),
        "Unexpected metrics format: {}",
        body
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let router = customer_service::startup::build_router(
        customer_service::startup::AppState::new(std::sync::Arc::new(
            customer_service::services::InMemoryCustomerStore::new(),
        )),
    );

    let response = router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
}
