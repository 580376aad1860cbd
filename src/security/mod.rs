// ABOUTME: Security module organization for CSRF, cookie, and path-sanitization utilities
// ABOUTME: Everything privileged routes depend on before touching external collaborators
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Security and request-validation primitives
//!
//! Every administrative and data endpoint passes through this layer: CSRF
//! token issuance and validation, cookie handling, and filename
//! sanitization against path traversal.

/// Cookie parsing and construction helpers
pub mod cookies;
/// CSRF token generation and double-submit validation
pub mod csrf;
/// Filename sanitization against path traversal
pub mod path_sanitizer;
