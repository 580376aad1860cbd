// ABOUTME: Admin API route handlers for administrative operations
// ABOUTME: REST endpoints for user and program administration behind the admin gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Admin routes for administrative operations
//!
//! User management (listing, deletion, password reset, role changes) and
//! program/batch visibility. All handlers are thin wrappers that delegate
//! the actual effect to the external datastore; the admin authorization
//! gate and CSRF validation are layered on in the server assembly, outside
//! this module.

mod programs;
mod types;
mod users;

pub use types::{ListUsersQuery, UpdateRoleRequest};

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::context::ApiContext;

/// Admin routes implementation
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    ///
    /// The returned router is unguarded; callers wrap it with the admin
    /// authorization and CSRF middleware.
    pub fn routes(context: Arc<ApiContext>) -> Router {
        Router::new()
            .merge(Self::user_routes(context.clone()))
            .merge(Self::program_routes(context))
    }

    /// User management routes
    fn user_routes(context: Arc<ApiContext>) -> Router {
        Router::new()
            .route(
                "/users",
                get(users::handle_list_users).delete(users::handle_missing_user_id),
            )
            // A delete aimed at the collection with a trailing slash is a
            // request with an empty user id.
            .route("/users/", delete(users::handle_missing_user_id))
            .route("/users/:user_id", delete(users::handle_delete_user))
            .route(
                "/users/:user_id/reset-password",
                post(users::handle_reset_user_password),
            )
            .route("/users/:user_id/role", put(users::handle_update_user_role))
            .with_state(context)
    }

    /// Program and batch visibility routes
    fn program_routes(context: Arc<ApiContext>) -> Router {
        Router::new()
            .route("/programs", get(programs::handle_list_programs))
            .with_state(context)
    }
}
