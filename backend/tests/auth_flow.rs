//! Authentication flow integration tests
//!
//! Registration, login and the access guard, driven through the HTTP router.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_access() {
    let app = test_app().await;

    let user = register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;
    assert_eq!(user["email"], ALICE_EMAIL);
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());

    let token = login(&app, ALICE_EMAIL, ALICE_PASSWORD).await;
    assert!(!token.is_empty());

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], ALICE_EMAIL);

    let tampered = tamper(&token);
    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["error_type"], "unauthenticated");
}

#[tokio::test]
async fn test_login_response_shape() {
    let app = test_app().await;
    register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": ALICE_EMAIL, "password": ALICE_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = test_app().await;
    register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": ALICE_EMAIL, "password": "not-her-password" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "nobody@x.com", "password": ALICE_PASSWORD })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
    assert_eq!(wrong_body["error"], unknown_body["error"]);
    assert!(wrong_body.get("access_token").is_none());
}

#[tokio::test]
async fn test_malformed_login_is_unauthorized() {
    let app = test_app().await;
    register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;

    for payload in [
        json!({ "email": "not-an-email", "password": ALICE_PASSWORD }),
        json!({ "email": ALICE_EMAIL, "password": "" }),
        json!({ "email": "", "password": "" }),
    ] {
        let (status, body) =
            send(&app, Method::POST, "/api/v1/auth/login", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "payload {payload}");
        assert_eq!(body["error"]["error_type"], "authentication_failed");
        assert!(body["error"].get("details").is_none());
    }
}

#[tokio::test]
async fn test_email_is_case_sensitive_for_login() {
    let app = test_app().await;
    register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "A@x.com", "password": ALICE_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = test_app().await;

    for uri in ["/api/v1/auth/me", "/api/v1/users", "/api/v1/products"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"]["error_type"], "unauthenticated");
    }

    let (status, _) = send(&app, Method::GET, "/api/v1/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_failures_share_one_body() {
    let app = test_app().await;
    let token = alice_token(&app).await;

    let (_, missing) = send(&app, Method::GET, "/api/v1/users", None, None).await;
    let (_, tampered) = send(&app, Method::GET, "/api/v1/users", Some(&tamper(&token)), None).await;

    assert_eq!(missing["message"], tampered["message"]);
    assert_eq!(missing["error"], tampered["error"]);
}

#[tokio::test]
async fn test_register_validation_and_conflict() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": "Alice", "email": ALICE_EMAIL, "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["error_type"], "validation_error");

    register(&app, "Alice", ALICE_EMAIL, ALICE_PASSWORD).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": "Impostor", "email": ALICE_EMAIL, "password": "longenough2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["error_type"], "already_exists");
}

#[tokio::test]
async fn test_public_banner_and_health() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
