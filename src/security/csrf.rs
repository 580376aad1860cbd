// ABOUTME: CSRF (Cross-Site Request Forgery) protection token generation and validation
// ABOUTME: Stateless double-submit tokens compared in constant time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! CSRF protection module
//!
//! Generates cryptographically secure CSRF tokens and validates the
//! double-submit pair (header token vs. cookie token). The server holds no
//! token state: the cookie is the single source of truth per client, so a
//! re-issued token supersedes the previous one by plain cookie overwrite
//! and expiry is enforced by the cookie's `Max-Age`.

use rand::RngCore;
use subtle::ConstantTimeEq;

/// CSRF token length in bytes (32 bytes = 256 bits)
const CSRF_TOKEN_LENGTH: usize = 32;

/// CSRF token lifetime in seconds (1 hour), applied as the cookie `Max-Age`
pub const CSRF_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Cookie carrying the client's current token
///
/// Deliberately not `HttpOnly`: client-side script must read it back and
/// echo it in the [`CSRF_HEADER_NAME`] header on mutating requests.
pub const CSRF_COOKIE_NAME: &str = "csrf-token";

/// Request/response header carrying the token
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Generate a new CSRF token
///
/// Returns a hex-encoded string of [`CSRF_TOKEN_LENGTH`] bytes drawn from
/// the thread-local CSPRNG. No inputs, no side effects; the caller persists
/// the value (cookie + response header).
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Validate a double-submit token pair
///
/// True iff both values are present, non-empty, and byte-for-byte equal.
/// The comparison is constant-time so a byte-by-byte early exit cannot be
/// measured.
#[must_use]
pub fn validate_token(submitted: &str, cookie: &str) -> bool {
    if submitted.is_empty() || cookie.is_empty() {
        return false;
    }
    submitted.as_bytes().ct_eq(cookie.as_bytes()).into()
}
