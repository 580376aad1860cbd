// ABOUTME: Dependency-injection context shared across route handlers and middleware
// ABOUTME: Holds the externally-owned collaborator clients, constructed once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Shared API context
//!
//! All collaborators are constructed once in the binary, wrapped in `Arc`,
//! and passed into the router as state — explicitly injected, reused, never
//! mutated. There is no module-level client singleton anywhere in this
//! crate.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::ServerConfig;
use crate::datastore::DataStore;

/// Shared state for every route handler and middleware
#[derive(Clone)]
pub struct ApiContext {
    /// External datastore client (row API, service-role credential)
    pub datastore: Arc<dyn DataStore>,
    /// External auth service client (identity resolution)
    pub auth: Arc<dyn AuthProvider>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ApiContext {
    /// Create a new context from constructed collaborators
    #[must_use]
    pub fn new(
        datastore: Arc<dyn DataStore>,
        auth: Arc<dyn AuthProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            datastore,
            auth,
            config,
        }
    }
}
