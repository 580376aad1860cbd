// ABOUTME: CSRF token issuance route
// ABOUTME: Issues a fresh double-submit token via cookie and response header
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! CSRF token issuance
//!
//! `GET /csrf-token` issues a fresh token to the caller: the value is set
//! as the client-readable `csrf-token` cookie and echoed in the
//! `x-csrf-token` response header so client script can attach it to
//! subsequent mutating requests (double-submit pattern). Issuing a new
//! token overwrites the previous cookie — only the latest token per client
//! validates.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::context::ApiContext;
use crate::errors::{AppError, AppResult};
use crate::security::cookies::build_token_cookie;
use crate::security::csrf::{
    generate_token, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CSRF_TOKEN_TTL_SECS,
};

/// CSRF routes implementation
pub struct CsrfRoutes;

impl CsrfRoutes {
    /// Create the token issuance route
    pub fn routes(context: Arc<ApiContext>) -> Router {
        Router::new()
            .route("/csrf-token", get(handle_issue_token))
            .with_state(context)
    }
}

/// Issue a fresh CSRF token
///
/// The cookie is `Secure` only in production deployments; it is never
/// `HttpOnly` because client script must read it back.
async fn handle_issue_token(
    State(context): State<Arc<ApiContext>>,
) -> AppResult<impl IntoResponse> {
    let token = generate_token();

    let cookie = build_token_cookie(
        CSRF_COOKIE_NAME,
        &token,
        CSRF_TOKEN_TTL_SECS,
        context.config.environment.is_production(),
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Failed to encode cookie: {e}")))?,
    );
    headers.insert(
        HeaderName::from_static(CSRF_HEADER_NAME),
        HeaderValue::from_str(&token)
            .map_err(|e| AppError::internal(format!("Failed to encode token header: {e}")))?,
    );

    debug!("CSRF token issued");

    Ok((
        headers,
        Json(json!({
            "success": true,
            "message": "CSRF token issued"
        })),
    ))
}
