// ABOUTME: Admin program visibility route handlers
// ABOUTME: Lists memorization programs and their enrollment batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::info;

use crate::context::ApiContext;
use crate::errors::AppResult;
use crate::middleware::AdminIdentity;

/// Handle program listing with enrollment batches
pub(super) async fn handle_list_programs(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
) -> AppResult<impl IntoResponse> {
    let programs = context.datastore.list_programs().await?;
    let total = programs.len();

    info!(admin = %admin.user_id, total, "programs listed");

    Ok(Json(json!({
        "programs": programs,
        "total": total
    })))
}
