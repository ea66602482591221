//! Product catalogue API integration tests

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_product_crud_round_trip() {
    let app = test_app().await;
    let token = alice_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        Some(json!({ "name": "Widget", "price": 19.999 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Widget");
    assert_eq!(body["data"]["price"], 20.0);
    let uri = format!("/api/v1/products/{}", body["data"]["id"]);

    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Widget");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&token),
        Some(json!({ "name": "Gadget" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gadget");
    assert_eq!(body["data"]["price"], 20.0);

    let (status, body) = send(&app, Method::GET, "/api/v1/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["pagination"]["per_page"], 20);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_product_payloads() {
    let app = test_app().await;
    let token = alice_token(&app).await;

    for payload in [
        json!({ "name": "Widget", "price": -1.0 }),
        json!({ "name": "", "price": 1.0 }),
        json!({ "name": "Widget", "price": 100_000_000.0 }),
        json!({ "name": "Widget", "price": 1e307 }),
    ] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/products",
            Some(&token),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["error_type"], "validation_error");
    }
}

#[tokio::test]
async fn test_products_require_valid_token() {
    let app = test_app().await;
    let token = alice_token(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(&tamper(&token)),
        Some(json!({ "name": "Widget", "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, Method::GET, "/api/v1/products", Some(&token), None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let app = test_app().await;
    let token = alice_token(&app).await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/products/404",
        Some(&token),
        Some(json!({ "price": 2.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
