// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds the full router around in-memory collaborator fakes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `tahfidz_server`

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use tahfidz_server::models::UserRole;
use tahfidz_server::server::TahfidzServer;
use tahfidz_server::test_utils::{test_context, FakeAuthProvider, FakeDataStore};

/// Access token the fake auth service resolves to the admin user
pub const ADMIN_TOKEN: &str = "admin-access-token";

/// Access token the fake auth service resolves to a non-admin user
pub const STUDENT_TOKEN: &str = "student-access-token";

/// A well-formed double-submit token pair value for mutating requests
pub const CSRF_PAIR: &str = "4cf8f167c6c9413f8d7c9a7f1f6da8b34cf8f167c6c9413f8d7c9a7f1f6da8b3";

/// Fixed admin user id
pub fn admin_id() -> Uuid {
    Uuid::from_u128(0x11)
}

/// Fixed non-admin (thalibah) user id
pub fn student_id() -> Uuid {
    Uuid::from_u128(0x22)
}

/// Build the full application router around fakes
///
/// The store starts with one admin and one thalibah; both have resolvable
/// access tokens.
pub async fn build_app(migrations_dir: PathBuf) -> (Router, Arc<FakeDataStore>) {
    let store = Arc::new(FakeDataStore::new());
    store
        .add_user(admin_id(), "admin@tahfidz.example", UserRole::Admin)
        .await;
    store
        .add_user(student_id(), "thalibah@tahfidz.example", UserRole::Thalibah)
        .await;

    let auth = Arc::new(
        FakeAuthProvider::new()
            .with_token(ADMIN_TOKEN, admin_id(), "admin@tahfidz.example")
            .with_token(STUDENT_TOKEN, student_id(), "thalibah@tahfidz.example"),
    );

    let context = test_context(store.clone(), auth, migrations_dir);
    (TahfidzServer::new(context).router(), store)
}

/// Build the app with a throwaway migrations directory
pub async fn build_app_default() -> (Router, Arc<FakeDataStore>) {
    build_app(std::env::temp_dir()).await
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Request with admin credentials and a valid CSRF pair
pub fn admin_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
        .header("x-csrf-token", CSRF_PAIR)
        .header("cookie", format!("csrf-token={CSRF_PAIR}"))
        .body(Body::empty())
        .unwrap()
}

/// Request with non-admin credentials and a valid CSRF pair
pub fn student_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {STUDENT_TOKEN}"))
        .header("x-csrf-token", CSRF_PAIR)
        .header("cookie", format!("csrf-token={CSRF_PAIR}"))
        .body(Body::empty())
        .unwrap()
}

/// Request with no credentials at all
pub fn anonymous_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
