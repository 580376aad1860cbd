// ABOUTME: Datastore abstraction layer for the external managed database service
// ABOUTME: Trait-based seam so handlers depend on an injected client, never a global
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Datastore abstraction
//!
//! The backend owns no storage: every read and write is delegated to the
//! external managed database service. [`DataStore`] is the seam — handlers
//! receive an `Arc<dyn DataStore>` constructed once at process start and
//! never mutated, so tests can substitute an in-memory fake and no
//! module-level client singleton exists anywhere.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Program, UserRole, UserSummary};

/// REST row-API client for the managed datastore
pub mod rest;

/// Errors surfaced by datastore operations
#[derive(Debug, Error)]
pub enum DataStoreError {
    /// The service answered with an error payload
    #[error("{message}")]
    Service {
        /// The service's own error message, forwarded verbatim
        message: String,
        /// The service's structured error payload
        details: Value,
    },
    /// The request never completed (connect failure, timeout)
    #[error("datastore request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered 2xx but the body was not what we expected
    #[error("unexpected datastore response: {0}")]
    Decode(String),
}

impl From<DataStoreError> for AppError {
    fn from(err: DataStoreError) -> Self {
        match err {
            DataStoreError::Service { message, details } => {
                Self::external_service(message).with_details(details)
            }
            DataStoreError::Transport(e) => {
                Self::external_service(e.to_string()).with_source(e)
            }
            DataStoreError::Decode(message) => Self::external_service(message),
        }
    }
}

/// Operations this backend issues against the external datastore
///
/// Methods mirror the privileged handlers one-to-one; no business logic
/// lives behind this trait, only transport.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Look up the role recorded for a user, `None` when the user is unknown
    async fn get_user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, DataStoreError>;

    /// List users, optionally filtered by role and active flag
    async fn list_users(
        &self,
        role: Option<UserRole>,
        active: Option<bool>,
    ) -> Result<Vec<UserSummary>, DataStoreError>;

    /// Whether the user has any program registrations on record
    async fn has_program_registrations(&self, user_id: Uuid) -> Result<bool, DataStoreError>;

    /// Soft-delete: mark the user inactive, preserving registration history
    async fn deactivate_user(&self, user_id: Uuid) -> Result<(), DataStoreError>;

    /// Hard-delete the user row
    async fn delete_user(&self, user_id: Uuid) -> Result<(), DataStoreError>;

    /// Update a user's role, returning the updated summary (`None` when the
    /// user is unknown)
    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Option<UserSummary>, DataStoreError>;

    /// Trigger the external password-reset routine for a user
    ///
    /// Returns the routine's result object unchanged; callers forward it to
    /// the admin verbatim.
    async fn request_password_reset(&self, user_id: Uuid) -> Result<Value, DataStoreError>;

    /// List programs with their enrollment batches
    async fn list_programs(&self) -> Result<Vec<Program>, DataStoreError>;
}
