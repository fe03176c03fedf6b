//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the JSON API against a
//! fresh in-memory database. Methods are intentionally broad to support
//! the different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fintrack::config::Config;
use fintrack::db::{create_in_memory_pool, migrations};
use fintrack::server;
use fintrack::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        Self::with_config(Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        Self {
            state: AppState::new(pool, config),
        }
    }

    /// Full router with the production middleware stack.
    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.request("GET", uri, None).await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, parse(&body))
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        let (status, body) = self.request("POST", uri, Some(payload.to_string())).await;
        (status, parse(&body))
    }

    pub async fn put_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        let (status, body) = self.request("PUT", uri, Some(payload.to_string())).await;
        (status, parse(&body))
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.request("DELETE", uri, None).await;
        (status, parse(&body))
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a transaction via POST and return its id. Panics unless the
    /// API answers 201.
    pub async fn create_transaction(
        &self,
        title: &str,
        amount: f64,
        category: &str,
        transaction_type: &str,
        date: &str,
    ) -> String {
        let (status, body) = self
            .post_json(
                "/api/transactions",
                &serde_json::json!({
                    "title": title,
                    "amount": amount,
                    "category": category,
                    "type": transaction_type,
                    "date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_str().expect("id missing").to_string()
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}
