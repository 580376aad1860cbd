// ABOUTME: Integration tests for admin user management routes
// ABOUTME: Covers deletion (soft and hard), password reset, role updates, and the admin gate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::{
    admin_request, anonymous_request, body_json, build_app_default, student_id, student_request,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_delete_without_registrations_is_hard() {
    let (app, store) = build_app_default().await;
    let target = student_id();

    let response = app
        .oneshot(admin_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(!store.contains_user(target).await);
}

#[tokio::test]
async fn test_delete_with_registrations_is_soft() {
    let (app, store) = build_app_default().await;
    let target = student_id();
    store.add_registration(target).await;

    let response = app
        .oneshot(admin_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["soft_delete"], true);

    // The row survives, deactivated.
    let user = store.get_user(target).await.unwrap();
    assert!(!user.is_active);
}

#[tokio::test]
async fn test_delete_with_empty_id_is_rejected() {
    let (app, _store) = build_app_default().await;

    let response = app
        .oneshot(admin_request("DELETE", "/users/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User ID is required");
}

#[tokio::test]
async fn test_delete_by_non_admin_leaves_store_untouched() {
    let (app, store) = build_app_default().await;
    let target = student_id();

    let response = app
        .oneshot(student_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(store.contains_user(target).await);
    assert!(store.get_user(target).await.unwrap().is_active);
}

#[tokio::test]
async fn test_delete_by_anonymous_caller_is_unauthorized() {
    let (app, store) = build_app_default().await;
    let target = student_id();

    let response = app
        .oneshot(anonymous_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.contains_user(target).await);
}

#[tokio::test]
async fn test_collaborator_error_is_forwarded_verbatim() {
    let (app, store) = build_app_default().await;
    let target = student_id();
    store
        .fail_with(
            "permission denied for table users",
            json!({"code": "42501", "hint": "check row level security"}),
        )
        .await;

    let response = app
        .oneshot(admin_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "permission denied for table users");
    assert_eq!(body["details"]["code"], "42501");
}

#[tokio::test]
async fn test_role_lookup_error_rejects_without_detail() {
    let (app, store) = build_app_default().await;
    let target = student_id();
    store.fail_role_lookup().await;

    let response = app
        .oneshot(admin_request("DELETE", &format!("/users/{target}")))
        .await
        .unwrap();

    // A broken lookup is indistinguishable from a non-admin caller.
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Admin access required");
}

#[tokio::test]
async fn test_reset_password_forwards_result_unchanged() {
    let (app, _store) = build_app_default().await;
    let target = student_id();

    let response = app
        .oneshot(admin_request(
            "POST",
            &format!("/users/{target}/reset-password"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({"success": true, "email": "thalibah@tahfidz.example"})
    );
}

#[tokio::test]
async fn test_reset_password_for_unknown_user_is_collaborator_error() {
    let (app, _store) = build_app_default().await;

    let response = app
        .oneshot(admin_request(
            "POST",
            "/users/00000000-0000-0000-0000-0000000000aa/reset-password",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_update_role() {
    let (app, store) = build_app_default().await;
    let target = student_id();

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/users/{target}/role"))
        .header("authorization", format!("Bearer {}", common::ADMIN_TOKEN))
        .header("x-csrf-token", common::CSRF_PAIR)
        .header("cookie", format!("csrf-token={}", common::CSRF_PAIR))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"role":"muallimah"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "muallimah");
    assert_eq!(
        store.get_user(target).await.unwrap().role.as_str(),
        "muallimah"
    );
}

#[tokio::test]
async fn test_update_role_rejects_unknown_role() {
    let (app, store) = build_app_default().await;
    let target = student_id();

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/users/{target}/role"))
        .header("authorization", format!("Bearer {}", common::ADMIN_TOKEN))
        .header("x-csrf-token", common::CSRF_PAIR)
        .header("cookie", format!("csrf-token={}", common::CSRF_PAIR))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"role":"superuser"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        store.get_user(target).await.unwrap().role.as_str(),
        "thalibah"
    );
}

#[tokio::test]
async fn test_list_users() {
    let (app, _store) = build_app_default().await;

    let response = app.oneshot(admin_request("GET", "/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_users_filtered_by_role() {
    let (app, _store) = build_app_default().await;

    let response = app
        .oneshot(admin_request("GET", "/users?role=admin"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["users"][0]["role"], "admin");
}

#[tokio::test]
async fn test_list_programs() {
    let (app, _store) = build_app_default().await;

    let response = app
        .oneshot(admin_request("GET", "/programs"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
}
