// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// Environment type controlling security-sensitive behavior
///
/// Production attaches the `Secure` attribute to issued token cookies;
/// development and testing do not (local HTTP).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development over plain HTTP
    #[default]
    Development,
    /// Deployed production over HTTPS
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Connection settings for the external managed datastore
///
/// The datastore is a collaborator reached over HTTPS: a row API for data
/// access plus an auth API for identity resolution. The service key is the
/// privileged credential used server-side only; the anon key accompanies
/// end-user access tokens during identity resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStoreConfig {
    /// Base URL of the datastore service
    pub base_url: String,
    /// Service-role API key (privileged, never sent to clients)
    pub service_key: String,
    /// Anonymous API key used when resolving end-user identities
    pub anon_key: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Security settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Comma-separated allowed CORS origins, or "*" for any
    pub cors_origins: String,
}

/// Migration file retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationsConfig {
    /// Trusted base directory containing migration `.sql` files
    pub dir: PathBuf,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// External datastore configuration
    pub datastore: DataStoreConfig,
    /// Security settings
    pub security: SecurityConfig,
    /// Migration file settings
    pub migrations: MigrationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or validation rejects the resulting configuration.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            host: env_var_or("HOST", "127.0.0.1"),
            http_port: env_var_or("HTTP_PORT", "8081")
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            datastore: DataStoreConfig {
                base_url: env::var("DATASTORE_URL").context("DATASTORE_URL must be set")?,
                service_key: env::var("DATASTORE_SERVICE_KEY")
                    .context("DATASTORE_SERVICE_KEY must be set")?,
                anon_key: env::var("DATASTORE_ANON_KEY")
                    .context("DATASTORE_ANON_KEY must be set")?,
                timeout_secs: env_var_or("DATASTORE_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid DATASTORE_TIMEOUT_SECS value")?,
            },
            security: SecurityConfig {
                cors_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            migrations: MigrationsConfig {
                dir: PathBuf::from(env_var_or("MIGRATIONS_DIR", "./migrations")),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for unusable values (bad datastore URL, empty
    /// credentials, port 0).
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT cannot be 0"));
        }

        Url::parse(&self.datastore.base_url)
            .with_context(|| format!("Invalid DATASTORE_URL: {}", self.datastore.base_url))?;

        if self.datastore.service_key.trim().is_empty() {
            return Err(anyhow::anyhow!("DATASTORE_SERVICE_KEY cannot be empty"));
        }
        if self.datastore.anon_key.trim().is_empty() {
            return Err(anyhow::anyhow!("DATASTORE_ANON_KEY cannot be empty"));
        }
        if self.migrations.dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("MIGRATIONS_DIR cannot be empty"));
        }

        Ok(())
    }

    /// One-line configuration summary for startup logs
    ///
    /// Never includes credentials.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "host={} port={} environment={} datastore={} migrations_dir={}",
            self.host,
            self.http_port,
            self.environment,
            self.datastore.base_url,
            self.migrations.dir.display()
        )
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
