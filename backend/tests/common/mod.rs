//! Common test utilities and helpers
//!
//! Builds the real application router over a fresh in-memory database and
//! offers small request helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use inventory_backend::{
    build_router, config::Config, database::Database, state::AppState,
    utils::password::MIN_BCRYPT_COST,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ALICE_EMAIL: &str = "a@x.com";
pub const ALICE_PASSWORD: &str = "longenough1";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "BCRYPT_COST" => Some(MIN_BCRYPT_COST.to_string()),
        _ => None,
    })
    .unwrap()
}

/// Router over a freshly migrated in-memory database.
pub async fn test_app() -> Router {
    let config = test_config();
    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();
    let state = AppState::new(&config, db.pool().clone()).unwrap();
    build_router(state)
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

/// Registers a user and returns the created record.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["data"].clone()
}

/// Logs in and returns the access token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Registers Alice and returns her access token.
pub async fn alice_token(app: &Router) -> String {
    register(app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;
    login(app, ALICE_EMAIL, ALICE_PASSWORD).await
}

/// Alters the last character of a token.
pub fn tamper(token: &str) -> String {
    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    tampered
}
