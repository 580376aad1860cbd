// ABOUTME: In-memory collaborator fakes for unit and integration tests
// ABOUTME: Substitutes the external datastore and auth service behind the trait seams
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Test utilities
//!
//! In-memory implementations of the [`DataStore`] and
//! [`crate::auth::AuthProvider`] seams so tests can drive the full router
//! without a live datastore, and can assert afterwards that a rejected
//! request caused no side effect.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{AuthIdentity, AuthProvider};
use crate::config::{
    DataStoreConfig, Environment, MigrationsConfig, SecurityConfig, ServerConfig,
};
use crate::context::ApiContext;
use crate::datastore::{DataStore, DataStoreError};
use crate::models::{Program, UserRole, UserSummary};

/// In-memory `DataStore` fake
///
/// A service error armed via [`Self::fail_with`] fails every data
/// operation while leaving the gate's role lookup healthy, so tests can
/// exercise handler-level error passthrough. [`Self::fail_role_lookup`]
/// breaks the lookup itself instead.
#[derive(Default)]
pub struct FakeDataStore {
    users: RwLock<HashMap<Uuid, UserSummary>>,
    registrations: RwLock<Vec<Uuid>>,
    programs: RwLock<Vec<Program>>,
    failure: RwLock<Option<(String, Value)>>,
    role_lookup_broken: RwLock<bool>,
}

impl FakeDataStore {
    /// Create an empty fake
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with the given role
    pub async fn add_user(&self, user_id: Uuid, email: &str, role: UserRole) {
        let summary = UserSummary {
            id: user_id,
            email: email.to_owned(),
            full_name: None,
            role,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        self.users.write().await.insert(user_id, summary);
    }

    /// Record a program registration for a user
    pub async fn add_registration(&self, user_id: Uuid) {
        self.registrations.write().await.push(user_id);
    }

    /// Insert a program
    pub async fn add_program(&self, program: Program) {
        self.programs.write().await.push(program);
    }

    /// Arm a service error: every subsequent data operation fails with it
    pub async fn fail_with(&self, message: &str, details: Value) {
        *self.failure.write().await = Some((message.to_owned(), details));
    }

    /// Break the role lookup the admin gate depends on
    pub async fn fail_role_lookup(&self) {
        *self.role_lookup_broken.write().await = true;
    }

    /// Whether a user row still exists
    pub async fn contains_user(&self, user_id: Uuid) -> bool {
        self.users.read().await.contains_key(&user_id)
    }

    /// Fetch a user's current state, if present
    pub async fn get_user(&self, user_id: Uuid) -> Option<UserSummary> {
        self.users.read().await.get(&user_id).cloned()
    }

    async fn check_failure(&self) -> Result<(), DataStoreError> {
        match self.failure.read().await.clone() {
            Some((message, details)) => Err(DataStoreError::Service { message, details }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataStore for FakeDataStore {
    async fn get_user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, DataStoreError> {
        if *self.role_lookup_broken.read().await {
            return Err(DataStoreError::Service {
                message: "role lookup failed".to_owned(),
                details: Value::Null,
            });
        }
        Ok(self.users.read().await.get(&user_id).map(|u| u.role))
    }

    async fn list_users(
        &self,
        role: Option<UserRole>,
        active: Option<bool>,
    ) -> Result<Vec<UserSummary>, DataStoreError> {
        self.check_failure().await?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .filter(|u| active.is_none_or(|a| u.is_active == a))
            .cloned()
            .collect())
    }

    async fn has_program_registrations(&self, user_id: Uuid) -> Result<bool, DataStoreError> {
        self.check_failure().await?;
        Ok(self.registrations.read().await.contains(&user_id))
    }

    async fn deactivate_user(&self, user_id: Uuid) -> Result<(), DataStoreError> {
        self.check_failure().await?;
        if let Some(user) = self.users.write().await.get_mut(&user_id) {
            user.is_active = false;
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), DataStoreError> {
        self.check_failure().await?;
        self.users.write().await.remove(&user_id);
        Ok(())
    }

    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Option<UserSummary>, DataStoreError> {
        self.check_failure().await?;
        let mut users = self.users.write().await;
        Ok(users.get_mut(&user_id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn request_password_reset(&self, user_id: Uuid) -> Result<Value, DataStoreError> {
        self.check_failure().await?;
        let users = self.users.read().await;
        let user = users.get(&user_id).ok_or_else(|| DataStoreError::Service {
            message: "User not found".to_owned(),
            details: Value::Null,
        })?;
        Ok(json!({
            "success": true,
            "email": user.email,
        }))
    }

    async fn list_programs(&self) -> Result<Vec<Program>, DataStoreError> {
        self.check_failure().await?;
        Ok(self.programs.read().await.clone())
    }
}

/// In-memory `AuthProvider` fake mapping fixed tokens to identities
#[derive(Default)]
pub struct FakeAuthProvider {
    tokens: HashMap<String, AuthIdentity>,
}

impl FakeAuthProvider {
    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token that resolves to the given user
    #[must_use]
    pub fn with_token(mut self, token: &str, user_id: Uuid, email: &str) -> Self {
        self.tokens.insert(
            token.to_owned(),
            AuthIdentity {
                user_id,
                email: Some(email.to_owned()),
            },
        );
        self
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn resolve_identity(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthIdentity>, DataStoreError> {
        Ok(self.tokens.get(access_token).cloned())
    }
}

/// Server configuration for tests
#[must_use]
pub fn test_config(migrations_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 8081,
        environment: Environment::Testing,
        datastore: DataStoreConfig {
            base_url: "https://example.datastore.dev".to_owned(),
            service_key: "test-service-key".to_owned(),
            anon_key: "test-anon-key".to_owned(),
            timeout_secs: 5,
        },
        security: SecurityConfig {
            cors_origins: "*".to_owned(),
        },
        migrations: MigrationsConfig {
            dir: migrations_dir,
        },
    }
}

/// Build a full API context around the given fakes
#[must_use]
pub fn test_context(
    datastore: Arc<FakeDataStore>,
    auth: Arc<FakeAuthProvider>,
    migrations_dir: PathBuf,
) -> Arc<ApiContext> {
    Arc::new(ApiContext::new(
        datastore,
        auth,
        Arc::new(test_config(migrations_dir)),
    ))
}
