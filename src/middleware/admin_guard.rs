// ABOUTME: Central admin authorization guard for routes requiring admin privileges
// ABOUTME: Resolves caller identity and role, rejecting non-admin callers up front
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Admin Authorization Gate
//!
//! The first gate evaluated on every privileged route: resolves the
//! caller's identity via the external auth service, looks up the role
//! recorded in the datastore, and rejects before any privileged side
//! effect can execute. An unresolvable identity is treated identically to
//! a non-admin identity. The gate performs no mutation and caches nothing
//! across requests.
//!
//! Rejection detail is deliberately flat — callers learn "forbidden", not
//! which step failed.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::extract_access_token;
use crate::context::ApiContext;
use crate::errors::AppError;
use crate::models::UserRole;

/// Identity admitted by the gate, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    /// The admin's user ID
    pub user_id: Uuid,
    /// The admin's email, when known
    pub email: Option<String>,
    /// The admin's role (always [`UserRole::Admin`] past the gate)
    pub role: UserRole,
}

/// Admin authorization middleware
///
/// # Errors
///
/// Returns 401 when no credentials are present or the auth service does not
/// recognize them, and 403 when the identity resolves but the role is not
/// admin — or when the role lookup itself fails.
pub async fn admin_auth_middleware(
    State(context): State<Arc<ApiContext>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_access_token(req.headers()).ok_or_else(AppError::auth_required)?;

    let identity = context
        .auth
        .resolve_identity(&token)
        .await
        .map_err(|e| {
            warn!(error = %e, "identity resolution failed");
            AppError::forbidden("Admin access required")
        })?
        .ok_or_else(|| AppError::auth_invalid("Invalid session. Please login again."))?;

    let role = context
        .datastore
        .get_user_role(identity.user_id)
        .await
        .map_err(|e| {
            warn!(user_id = %identity.user_id, error = %e, "role lookup failed");
            AppError::forbidden("Admin access required")
        })?
        .ok_or_else(|| {
            warn!(user_id = %identity.user_id, "no role on record");
            AppError::forbidden("Admin access required")
        })?;

    if !role.is_admin() {
        warn!(user_id = %identity.user_id, %role, "non-admin caller rejected");
        return Err(AppError::forbidden("Admin access required"));
    }

    debug!(user_id = %identity.user_id, "admin authorized");

    req.extensions_mut().insert(AdminIdentity {
        user_id: identity.user_id,
        email: identity.email,
        role,
    });

    Ok(next.run(req).await)
}
