// ABOUTME: Main library entry point for the Tahfidz program backend
// ABOUTME: User administration, enrollment visibility, and the security gate layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Tahfidz Server
//!
//! Backend for managing a Quran-memorization ("Tahfidz") program: user
//! administration, program/batch enrollment visibility, and the privileged
//! operational endpoints admins rely on. Persistence and credentials are
//! owned by an external managed database service; every route here is thin
//! orchestration over that collaborator.
//!
//! ## Architecture
//!
//! - **Security layer**: CSRF token issuance/validation (double-submit),
//!   filename sanitization, and the admin authorization gate every
//!   privileged route passes through
//! - **Routes**: axum handlers that validate input, call the datastore, and
//!   reshape the answer as JSON
//! - **Datastore**: trait-based client for the external service, injected
//!   once at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tahfidz_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Tahfidz server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Identity resolution against the external auth collaborator
pub mod auth;

/// Configuration management
pub mod config;

/// Dependency-injection context shared across handlers
pub mod context;

/// Datastore abstraction over the external managed database
pub mod datastore;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Logging configuration and structured logging setup
pub mod logging;

/// Request middleware: admin gate, CSRF validation, CORS
pub mod middleware;

/// Core data models
pub mod models;

/// HTTP route handlers
pub mod routes;

/// Security and request-validation primitives
pub mod security;

/// HTTP server assembly
pub mod server;

/// In-memory collaborator fakes for tests
pub mod test_utils;
