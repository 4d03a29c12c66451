#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use customer_service::services::{
    CustomerStore, InMemoryCustomerStore, MongoCustomerStore, MongoDb,
};
use customer_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const GENERIC_ERROR: &str = "Oops! Something went wrong!";

/// Nothing listens on port 1; short timeouts keep the failing calls fast.
pub const UNREACHABLE_MONGODB_URI: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Response body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn with_store(store: Arc<dyn CustomerStore>) -> Self {
        Self {
            router: build_router(AppState::new(store)),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryCustomerStore::new()))
    }

    pub fn offline() -> Self {
        Self::with_store(Arc::new(InMemoryCustomerStore::unavailable()))
    }

    /// App backed by the real MongoDB store pointed at a dead address.
    pub async fn unreachable_mongo() -> Self {
        let db = MongoDb::connect(UNREACHABLE_MONGODB_URI, "customer_offline_test")
            .await
            .expect("URI should parse without contacting the server");
        Self::with_store(Arc::new(MongoCustomerStore::new(db)))
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send_json(Method::POST, uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send_json(Method::PUT, uri, body).await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.send_raw(method, uri, "application/json", body.to_string())
            .await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    /// All customers currently returned by `GET /customers`.
    pub async fn customers(&self) -> Vec<Value> {
        let response = self.get("/customers").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response
            .json()
            .as_array()
            .cloned()
            .expect("GET /customers must return an array")
    }
}

/// Customers whose `id` equals `id`.
pub fn with_id<'a>(customers: &'a [Value], id: &str) -> Vec<&'a Value> {
    customers.iter().filter(|c| c["id"] == id).collect()
}
