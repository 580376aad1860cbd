// ABOUTME: Admin user management route handlers
// ABOUTME: Handles user listing, deletion, password reset, and role updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::types::{ListUsersQuery, UpdateRoleRequest};
use crate::context::ApiContext;
use crate::errors::{AppError, AppResult};
use crate::middleware::AdminIdentity;
use crate::models::UserRole;

/// Parse and validate a user id path parameter
///
/// An empty id is a missing required field; a malformed one is invalid
/// input. Both reject before any collaborator call.
fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field("User ID is required"));
    }
    Uuid::parse_str(trimmed)
        .map_err(|e| AppError::invalid_input(format!("Invalid user ID format: {e}")))
}

/// Handle user listing
pub(super) async fn handle_list_users(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
    Query(params): Query<ListUsersQuery>,
) -> AppResult<impl IntoResponse> {
    let role = params
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(|e| AppError::invalid_input(format!("Invalid role filter: {e}")))?;

    let users = context.datastore.list_users(role, params.active).await?;
    let total = users.len();

    info!(admin = %admin.user_id, total, "users listed");

    Ok(Json(json!({
        "users": users,
        "total": total
    })))
}

/// Reject requests that address the user collection without an id
pub(super) async fn handle_missing_user_id() -> AppError {
    AppError::missing_field("User ID is required")
}

/// Handle user deletion
///
/// Users with program registrations on record are deactivated instead of
/// removed, preserving enrollment history; users without any are deleted
/// outright. Both outcomes report a generic confirmation.
pub(super) async fn handle_delete_user(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;

    if context.datastore.has_program_registrations(user_id).await? {
        context.datastore.deactivate_user(user_id).await?;

        info!(admin = %admin.user_id, user = %user_id, "user soft-deleted");

        return Ok(Json(json!({
            "success": true,
            "message": "User deactivated successfully (soft delete)",
            "soft_delete": true
        })));
    }

    context.datastore.delete_user(user_id).await?;

    info!(admin = %admin.user_id, user = %user_id, "user deleted");

    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully"
    })))
}

/// Handle password reset for a user
///
/// Delegates entirely to the external reset routine and forwards its result
/// object unchanged.
pub(super) async fn handle_reset_user_password(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;

    let outcome = context.datastore.request_password_reset(user_id).await?;

    info!(admin = %admin.user_id, user = %user_id, "password reset requested");

    Ok(Json(outcome))
}

/// Handle role update for a user
pub(super) async fn handle_update_user_role(
    State(context): State<Arc<ApiContext>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&user_id)?;

    let role: UserRole = request
        .role
        .parse()
        .map_err(|e| AppError::invalid_input(format!("Invalid role: {e}")))?;

    let updated = context
        .datastore
        .update_user_role(user_id, role)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!(admin = %admin.user_id, user = %user_id, %role, "user role updated");

    Ok(Json(json!({
        "success": true,
        "user": updated
    })))
}
