//! Shared test utilities for integration tests.
//!
//! `TestClient` sends requests straight into the router, backed by a fresh
//! in-memory database. `spawn_server` runs the same application on an ephemeral
//! port for tests that need a real HTTP connection.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use expense_tracker::config::Config;
use expense_tracker::db::queries::transactions;
use expense_tracker::db::{create_in_memory_pool, migrations};
use expense_tracker::models::{NewTransaction, Transaction};
use expense_tracker::server::{build_router, serve};
use expense_tracker::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tower::ServiceExt;

fn test_state() -> AppState {
    let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
    {
        let conn = pool.get().expect("Failed to get connection");
        migrations::run_migrations(&conn, Path::new("migrations"))
            .expect("Failed to run migrations");
    }

    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_path: PathBuf::from(":memory:"),
        migrations_path: PathBuf::from("migrations"),
    };

    AppState::new(pool, config)
}

/// Start the full application on `127.0.0.1` with an OS-assigned port and
/// return its API base URL.
pub async fn spawn_server() -> String {
    let app = build_router(test_state());
    let (port, _handle) = serve(app, "127.0.0.1", 0)
        .await
        .expect("Failed to start server");
    format!("http://127.0.0.1:{}/api", port)
}

/// Sends sequential requests against one application instance.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    pub fn new() -> Self {
        Self {
            state: test_state(),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST a raw body as JSON.
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Option<Value>) {
        let (status, body) = self.post_raw(uri, &body.to_string()).await;
        (status, serde_json::from_str(&body).ok())
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Option<Value>) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_str(&body).ok())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    /// Store a transaction directly, bypassing request validation.
    pub fn insert(&self, transaction: &NewTransaction) -> Transaction {
        let conn = self.state.db.get().expect("Failed to get connection");
        transactions::create_transaction(&conn, transaction).expect("Failed to insert")
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a transaction and return its id.
    pub async fn create_transaction(
        &self,
        amount: f64,
        kind: &str,
        category: &str,
        date: &str,
    ) -> String {
        let (status, body) = self
            .post_json(
                "/transactions",
                &serde_json::json!({
                    "amount": amount,
                    "type": kind,
                    "category": category,
                    "date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        body.and_then(|b| b["id"].as_str().map(str::to_string))
            .expect("created transaction has an id")
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
