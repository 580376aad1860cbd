// ABOUTME: HTTP server assembly wiring routes, gates, and shared middleware
// ABOUTME: Builds the axum router and runs it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Server assembly
//!
//! Privileged routes (user administration, program visibility, migration
//! retrieval) are wrapped in two gates: the admin authorization gate runs
//! first on every request, then CSRF validation for mutating verbs. Public
//! routes (health, token issuance) sit outside the gates. Tracing and CORS
//! wrap everything.

use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::context::ApiContext;
use crate::middleware::{admin_auth_middleware, csrf_middleware, setup_cors};
use crate::routes::admin::AdminRoutes;
use crate::routes::csrf::CsrfRoutes;
use crate::routes::health::HealthRoutes;
use crate::routes::migrations::MigrationRoutes;

/// Tahfidz backend HTTP server
pub struct TahfidzServer {
    context: Arc<ApiContext>,
}

impl TahfidzServer {
    /// Create a new server from a constructed context
    #[must_use]
    pub const fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        // Layers added later wrap earlier ones and therefore run first:
        // the admin gate is added last so it is always the first gate
        // evaluated, with CSRF validation behind it.
        let privileged = Router::new()
            .merge(AdminRoutes::routes(self.context.clone()))
            .merge(MigrationRoutes::routes(self.context.clone()))
            .layer(middleware::from_fn(csrf_middleware))
            .layer(middleware::from_fn_with_state(
                self.context.clone(),
                admin_auth_middleware,
            ));

        Router::new()
            .merge(HealthRoutes::routes())
            .merge(CsrfRoutes::routes(self.context.clone()))
            .merge(privileged)
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.context.config.security))
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails
    /// while running.
    pub async fn run(self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.context.config.host, self.context.config.http_port
        );
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

/// Resolve when the process receives a shutdown request
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    info!("shutdown signal received");
}
