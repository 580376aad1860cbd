// ABOUTME: REST client for the managed datastore's row and auth APIs
// ABOUTME: Implements the DataStore trait over a pooled reqwest client
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! REST datastore client
//!
//! Speaks the managed database service's row API (`/rest/v1/{table}` with
//! `column=eq.value` filters) using the service-role key, and its auth API
//! (`/auth/v1`) for the password-reset routine. One pooled client, one
//! timeout; a failed call surfaces immediately as an error response — no
//! retry logic lives here.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::time::Duration;
use uuid::Uuid;

use super::{DataStore, DataStoreError};
use crate::config::DataStoreConfig;
use crate::models::{Program, UserRole, UserSummary};

/// Table names in the external datastore
mod tables {
    pub const USERS: &str = "users";
    pub const REGISTRATIONS: &str = "program_registrations";
    pub const PROGRAMS: &str = "programs";
}

/// Columns fetched for user listings
const USER_COLUMNS: &str = "id,email,full_name,role,is_active,created_at";

/// `DataStore` implementation over the managed service's REST APIs
pub struct RestDataStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestDataStore {
    /// Create a client from datastore configuration
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
            service_key: config.service_key.clone(),
        })
    }

    /// Build a request against the row API with service-role credentials
    fn row_request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Build a request against the auth API with service-role credentials
    fn auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/{path}", self.base_url);
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Fetch rows from a table, decoding into `T`
    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, DataStoreError> {
        let response = self
            .row_request(Method::GET, table)
            .query(query)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single user's email, if the user exists
    async fn get_user_email(&self, user_id: Uuid) -> Result<Option<String>, DataStoreError> {
        #[derive(Deserialize)]
        struct EmailRow {
            email: String,
        }

        let rows: Vec<EmailRow> = self
            .get_rows(
                tables::USERS,
                &[
                    ("id", eq(user_id)),
                    ("select", "email".to_owned()),
                    ("limit", "1".to_owned()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| row.email))
    }
}

#[async_trait]
impl DataStore for RestDataStore {
    async fn get_user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, DataStoreError> {
        #[derive(Deserialize)]
        struct RoleRow {
            role: String,
        }

        let rows: Vec<RoleRow> = self
            .get_rows(
                tables::USERS,
                &[
                    ("id", eq(user_id)),
                    ("select", "role".to_owned()),
                    ("limit", "1".to_owned()),
                ],
            )
            .await?;

        match rows.into_iter().next() {
            None => Ok(None),
            Some(row) => row.role.parse().map(Some).map_err(DataStoreError::Decode),
        }
    }

    async fn list_users(
        &self,
        role: Option<UserRole>,
        active: Option<bool>,
    ) -> Result<Vec<UserSummary>, DataStoreError> {
        let mut query = vec![
            ("select", USER_COLUMNS.to_owned()),
            ("order", "created_at.desc".to_owned()),
        ];
        if let Some(role) = role {
            query.push(("role", format!("eq.{role}")));
        }
        if let Some(active) = active {
            query.push(("is_active", format!("eq.{active}")));
        }

        self.get_rows(tables::USERS, &query).await
    }

    async fn has_program_registrations(&self, user_id: Uuid) -> Result<bool, DataStoreError> {
        #[derive(Deserialize)]
        struct IdRow {
            #[allow(dead_code)]
            id: Uuid,
        }

        let rows: Vec<IdRow> = self
            .get_rows(
                tables::REGISTRATIONS,
                &[
                    ("user_id", eq(user_id)),
                    ("select", "id".to_owned()),
                    ("limit", "1".to_owned()),
                ],
            )
            .await?;

        Ok(!rows.is_empty())
    }

    async fn deactivate_user(&self, user_id: Uuid) -> Result<(), DataStoreError> {
        let response = self
            .row_request(Method::PATCH, tables::USERS)
            .query(&[("id", eq(user_id))])
            .json(&json!({
                "is_active": false,
                "updated_at": chrono::Utc::now(),
            }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), DataStoreError> {
        let response = self
            .row_request(Method::DELETE, tables::USERS)
            .query(&[("id", eq(user_id))])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Option<UserSummary>, DataStoreError> {
        let response = self
            .row_request(Method::PATCH, tables::USERS)
            .query(&[("id", eq(user_id)), ("select", USER_COLUMNS.to_owned())])
            .header("Prefer", "return=representation")
            .json(&json!({ "role": role }))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let mut rows: Vec<UserSummary> = response.json().await?;
        Ok(rows.pop())
    }

    async fn request_password_reset(&self, user_id: Uuid) -> Result<Value, DataStoreError> {
        let email = self.get_user_email(user_id).await?.ok_or_else(|| {
            DataStoreError::Service {
                message: "User not found".to_owned(),
                details: Value::Null,
            }
        })?;

        let response = self
            .auth_request(Method::POST, "recover")
            .json(&json!({ "email": email }))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        // The reset routine's result object is forwarded unchanged; an
        // empty success body becomes an empty object.
        Ok(response.json().await.unwrap_or_else(|_| json!({})))
    }

    async fn list_programs(&self) -> Result<Vec<Program>, DataStoreError> {
        self.get_rows(
            tables::PROGRAMS,
            &[
                ("select", "*,batches(*)".to_owned()),
                ("order", "name.asc".to_owned()),
            ],
        )
        .await
    }
}

/// Equality filter in the row API's `eq.` syntax
fn eq(value: impl Display) -> String {
    format!("eq.{value}")
}

/// Reject non-2xx responses, forwarding the service's error payload
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DataStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let details: Value = response.json().await.unwrap_or(Value::Null);
    let message = details.get("message").and_then(Value::as_str).map_or_else(
        || format!("datastore returned HTTP {status}"),
        ToOwned::to_owned,
    );

    Err(DataStoreError::Service { message, details })
}
