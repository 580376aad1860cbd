// ABOUTME: Request and response types for admin routes
// ABOUTME: DTOs for user listing filters and role updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Admin request and response types

use serde::Deserialize;

/// Query parameters for listing users
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Filter by role (admin/musyrifah/muallimah/thalibah)
    pub role: Option<String>,
    /// Filter by active flag
    pub active: Option<bool>,
}

/// Role update request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role for the user
    pub role: String,
}
