// ABOUTME: HTTP route module organization for the Tahfidz backend API
// ABOUTME: Health, CSRF issuance, migration retrieval, and admin route groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! HTTP routes
//!
//! Route handlers are thin orchestration: validate input, call an external
//! collaborator, reshape the answer as JSON. Business logic lives behind
//! the collaborators, never in a handler.

/// Admin routes for privileged user and program administration
pub mod admin;
/// CSRF token issuance route
pub mod csrf;
/// Health and readiness routes
pub mod health;
/// Migration file retrieval route
pub mod migrations;
