// ABOUTME: Integration tests for CSRF token issuance and double-submit validation
// ABOUTME: Covers cookie/header issuance, missing and mismatched pairs, and supersession
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used)]

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{anonymous_request, body_json, build_app_default, student_id, ADMIN_TOKEN};
use tower::ServiceExt;

/// Pull the token value out of the issued `Set-Cookie` header
fn cookie_token(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("csrf-token="))
        .unwrap()
}

#[tokio::test]
async fn test_token_issuance_sets_cookie_and_header() {
    let (app, _store) = build_app_default().await;

    let response = app
        .oneshot(anonymous_request("GET", "/csrf-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let header_token = response
        .headers()
        .get("x-csrf-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    // Double-submit: the same token travels in the cookie and the header.
    assert_eq!(cookie_token(&set_cookie), header_token);

    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(set_cookie.contains("SameSite=Lax"));
    // Client script must be able to read the cookie back.
    assert!(!set_cookie.contains("HttpOnly"));
    // The test environment serves plain HTTP.
    assert!(!set_cookie.contains("Secure"));

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_consecutive_tokens_differ() {
    let (app, _store) = build_app_default().await;

    let first = app
        .clone()
        .oneshot(anonymous_request("GET", "/csrf-token"))
        .await
        .unwrap();
    let second = app
        .oneshot(anonymous_request("GET", "/csrf-token"))
        .await
        .unwrap();

    let token_a = first.headers().get("x-csrf-token").unwrap().clone();
    let token_b = second.headers().get("x-csrf-token").unwrap().clone();
    assert_ne!(token_a, token_b);
}

fn delete_request(csrf_header: Option<&str>, csrf_cookie: Option<&str>) -> Request<Body> {
    let uri = format!("/users/{}", student_id());
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"));
    if let Some(token) = csrf_header {
        builder = builder.header("x-csrf-token", token);
    }
    if let Some(token) = csrf_cookie {
        builder = builder.header("cookie", format!("csrf-token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_mutating_request_without_token_is_rejected() {
    let (app, store) = build_app_default().await;

    let response = app.oneshot(delete_request(None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid CSRF token");
    // Rejection happened before the handler: no side effect.
    assert!(store.contains_user(student_id()).await);
}

#[tokio::test]
async fn test_mismatched_pair_is_rejected() {
    let (app, store) = build_app_default().await;

    let response = app
        .oneshot(delete_request(Some("token-one"), Some("token-two")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(store.contains_user(student_id()).await);
}

#[tokio::test]
async fn test_header_without_cookie_is_rejected() {
    let (app, store) = build_app_default().await;

    let response = app
        .oneshot(delete_request(Some("token-one"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(store.contains_user(student_id()).await);
}

#[tokio::test]
async fn test_matching_pair_passes() {
    let (app, store) = build_app_default().await;

    let response = app
        .oneshot(delete_request(Some("shared-token"), Some("shared-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!store.contains_user(student_id()).await);
}

#[tokio::test]
async fn test_reissued_token_supersedes_previous_one() {
    let (app, store) = build_app_default().await;

    // Issue twice; the browser keeps only the latest cookie.
    let first = app
        .clone()
        .oneshot(anonymous_request("GET", "/csrf-token"))
        .await
        .unwrap();
    let second = app
        .clone()
        .oneshot(anonymous_request("GET", "/csrf-token"))
        .await
        .unwrap();

    let old_token = first
        .headers()
        .get("x-csrf-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let new_token = second
        .headers()
        .get("x-csrf-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    // A script still echoing the superseded token no longer matches the
    // cookie the client now holds.
    let stale = app
        .clone()
        .oneshot(delete_request(Some(&old_token), Some(&new_token)))
        .await
        .unwrap();
    assert_eq!(stale.status(), StatusCode::FORBIDDEN);
    assert!(store.contains_user(student_id()).await);

    let fresh = app
        .oneshot(delete_request(Some(&new_token), Some(&new_token)))
        .await
        .unwrap();
    assert_eq!(fresh.status(), StatusCode::OK);
    assert!(!store.contains_user(student_id()).await);
}

#[tokio::test]
async fn test_read_requests_need_no_token() {
    let (app, _store) = build_app_default().await;

    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
