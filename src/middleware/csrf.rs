// ABOUTME: CSRF validation middleware for state-changing HTTP requests
// ABOUTME: Validates the double-submit header/cookie token pair before handlers run
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! CSRF validation middleware
//!
//! Validates CSRF tokens for state-changing operations (POST, PUT, DELETE,
//! PATCH): the token submitted in the `x-csrf-token` header must match the
//! token bound to the client via the `csrf-token` cookie. Validation runs
//! strictly before the handler, so a rejected request causes no side
//! effect.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::security::cookies::get_cookie_value;
use crate::security::csrf::{validate_token, CSRF_COOKIE_NAME, CSRF_HEADER_NAME};

/// Check if a request method requires CSRF validation
#[must_use]
pub const fn requires_csrf_validation(method: &Method) -> bool {
    matches!(
        method,
        &Method::POST | &Method::PUT | &Method::DELETE | &Method::PATCH
    )
}

/// CSRF validation middleware
///
/// # Errors
///
/// Returns 403 when a state-changing request carries no token pair or a
/// mismatched one. Read-only verbs pass through untouched.
pub async fn csrf_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    if requires_csrf_validation(req.method()) {
        let headers = req.headers();
        let submitted = headers
            .get(CSRF_HEADER_NAME)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();
        let cookie = get_cookie_value(headers, CSRF_COOKIE_NAME).unwrap_or_default();

        if !validate_token(submitted, &cookie) {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "CSRF token missing or mismatched"
            );
            return Err(AppError::forbidden("Invalid CSRF token"));
        }

        debug!(method = %req.method(), "CSRF token validated");
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutating_verbs_require_validation() {
        assert!(requires_csrf_validation(&Method::POST));
        assert!(requires_csrf_validation(&Method::PUT));
        assert!(requires_csrf_validation(&Method::DELETE));
        assert!(requires_csrf_validation(&Method::PATCH));
    }

    #[test]
    fn test_read_verbs_are_exempt() {
        assert!(!requires_csrf_validation(&Method::GET));
        assert!(!requires_csrf_validation(&Method::HEAD));
        assert!(!requires_csrf_validation(&Method::OPTIONS));
    }
}
