// ABOUTME: Cookie header parsing and Set-Cookie construction helpers
// ABOUTME: Shared by the CSRF routes/middleware and the admin authorization gate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Cookie utilities
//!
//! Minimal request-cookie parsing and `Set-Cookie` construction. Session
//! and cookie mechanics beyond token issuance are owned by the external
//! auth collaborator; this module only reads values off the wire.

use axum::http::HeaderMap;

/// Extract a named cookie value from request headers
///
/// Scans every `Cookie` header, splitting on `;` pairs. Returns the first
/// match.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

/// Build a `Set-Cookie` value for a client-readable token cookie
///
/// `HttpOnly` is intentionally absent: the double-submit pattern requires
/// client script to read the cookie back. `Secure` is attached only when
/// the deployment environment serves HTTPS.
#[must_use]
pub fn build_token_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
