// ABOUTME: Configuration module organization for environment-based settings
// ABOUTME: Re-exports the server configuration types loaded from environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration management
//!
//! Environment-only configuration: every setting is read from process
//! environment variables at startup and validated before the server binds.

/// Environment-based server configuration
pub mod environment;

pub use environment::{
    DataStoreConfig, Environment, MigrationsConfig, SecurityConfig, ServerConfig,
};
