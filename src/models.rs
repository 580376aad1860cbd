// ABOUTME: Core data models for the Tahfidz program backend
// ABOUTME: Defines user roles, sanitized user summaries, and enrollment records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Models
//!
//! Core data structures shared across route handlers and the datastore
//! client. The backend references records in the external managed datastore
//! by id; these models cover only the fields this service reads or writes,
//! never the store's full schema.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles a user can hold in the Tahfidz program
///
/// Stored as lowercase strings in the external datastore. Only `Admin`
/// passes the admin authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Program administrator with access to privileged operations
    Admin,
    /// Supervisor overseeing study circles
    Musyrifah,
    /// Teacher leading a study circle
    Muallimah,
    /// Enrolled student
    Thalibah,
}

impl UserRole {
    /// Whether this role passes the admin authorization gate
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// String form as stored in the datastore
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Musyrifah => "musyrifah",
            Self::Muallimah => "muallimah",
            Self::Thalibah => "thalibah",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "musyrifah" => Ok(Self::Musyrifah),
            "muallimah" => Ok(Self::Muallimah),
            "thalibah" => Ok(Self::Thalibah),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Sanitized user summary for admin listings
///
/// Never carries password or auth material; the external auth service owns
/// credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID
    pub id: Uuid,
    /// User email
    pub email: String,
    /// Full display name
    pub full_name: Option<String>,
    /// Role in the program
    pub role: UserRole,
    /// Whether the account is active (soft-deleted accounts are inactive)
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A memorization program offered by the institution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Program ID
    pub id: Uuid,
    /// Program name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Whether the program currently accepts enrollment
    pub is_active: bool,
    /// Enrollment batches belonging to this program
    #[serde(default)]
    pub batches: Vec<Batch>,
}

/// An enrollment batch within a program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Batch ID
    pub id: Uuid,
    /// Owning program ID
    pub program_id: Uuid,
    /// Batch name (e.g., "Batch 7")
    pub name: String,
    /// Registration window open
    pub registration_open: Option<DateTime<Utc>>,
    /// Registration window close
    pub registration_close: Option<DateTime<Utc>>,
}
