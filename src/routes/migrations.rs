// ABOUTME: Migration file retrieval route for admin operators
// ABOUTME: Serves .sql files from the trusted migrations directory after sanitization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Migration file retrieval
//!
//! `GET /migration/:filename` returns the content of one migration file
//! from the configured base directory. The filename must end `.sql` before
//! sanitization; the sanitized name is what gets joined with the base
//! directory. Every read failure — including a name the sanitizer stripped
//! to nothing — is reported as the same generic 404 so callers cannot
//! probe which files exist.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use crate::context::ApiContext;
use crate::errors::{AppError, AppResult};
use crate::middleware::AdminIdentity;
use crate::security::path_sanitizer::sanitize_filename;

/// Migration routes implementation
pub struct MigrationRoutes;

impl MigrationRoutes {
    /// Create the migration retrieval route
    pub fn routes(context: Arc<ApiContext>) -> Router {
        Router::new()
            .route("/migration/:filename", get(handle_get_migration))
            .with_state(context)
    }
}

/// Serve one migration file by sanitized name
async fn handle_get_migration(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !filename.ends_with(".sql") {
        return Err(AppError::invalid_input("Invalid file type"));
    }

    let safe_name = sanitize_filename(&filename);
    if safe_name.is_empty() {
        return Err(AppError::not_found("Migration file not found"));
    }

    let path = context.config.migrations.dir.join(&safe_name);
    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        debug!(file = %safe_name, error = %e, "migration file read failed");
        AppError::not_found("Migration file not found")
    })?;

    info!(admin = %admin.user_id, file = %safe_name, "migration file served");

    Ok(Json(json!({
        "filename": safe_name,
        "content": content
    })))
}
