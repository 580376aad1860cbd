// ABOUTME: Identity resolution against the external auth collaborator
// ABOUTME: Extracts request credentials and resolves them to a user identity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Identity Resolution
//!
//! Credentials (bearer token or auth cookie) are owned and validated by the
//! external auth service; this module only carries the token across and
//! maps the answer to an [`AuthIdentity`]. No session state is held here
//! and nothing is cached across requests.

use async_trait::async_trait;
use axum::http::HeaderMap;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::config::DataStoreConfig;
use crate::datastore::DataStoreError;
use crate::security::cookies::get_cookie_value;

/// Cookie carrying the end-user access token for web clients
pub const AUTH_COOKIE_NAME: &str = "auth-token";

/// A resolved end-user identity
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    /// The user's ID in the external auth service (and the users table)
    pub user_id: Uuid,
    /// The user's email, when the auth service reports one
    pub email: Option<String>,
}

/// Collaborator that resolves access tokens to identities
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the identity behind an access token
    ///
    /// Returns `Ok(None)` when the token is invalid or expired — callers
    /// treat an unresolvable identity exactly like a non-admin one.
    ///
    /// # Errors
    ///
    /// Returns an error only when the auth service itself cannot be reached
    /// or answers with an unexpected payload.
    async fn resolve_identity(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthIdentity>, DataStoreError>;
}

/// `AuthProvider` implementation over the managed service's auth API
pub struct RestAuthProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestAuthProvider {
    /// Create a provider from datastore configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &DataStoreConfig) -> Result<Self, DataStoreError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            anon_key: config.anon_key.clone(),
        })
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn resolve_identity(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthIdentity>, DataStoreError> {
        #[derive(Deserialize)]
        struct UserPayload {
            id: Uuid,
            email: Option<String>,
        }

        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // An invalid or expired token is a normal outcome, not a transport
        // failure.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let details = response
                .json()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(DataStoreError::Service {
                message: format!("auth service returned HTTP {status}"),
                details,
            });
        }

        let payload: UserPayload = response.json().await?;
        Ok(Some(AuthIdentity {
            user_id: payload.id,
            email: payload.email,
        }))
    }
}

/// Extract the caller's access token from request headers
///
/// Web clients carry it in the [`AUTH_COOKIE_NAME`] cookie; API clients use
/// an `Authorization: Bearer` header. The header wins when both are
/// present.
#[must_use]
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| get_cookie_value(headers, AUTH_COOKIE_NAME))
}
