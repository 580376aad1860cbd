// ABOUTME: Middleware module organization for request gating
// ABOUTME: Admin authorization gate, CSRF validation, and CORS configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Request middleware
//!
//! Privileged routes are wrapped in two gates, evaluated in order: the
//! admin authorization gate first, then CSRF validation for mutating
//! verbs. Only when both pass does a request reach its handler.

/// Admin authorization gate
pub mod admin_guard;
/// CORS layer configuration
pub mod cors;
/// CSRF double-submit validation
pub mod csrf;

pub use admin_guard::{admin_auth_middleware, AdminIdentity};
pub use cors::setup_cors;
pub use csrf::csrf_middleware;
