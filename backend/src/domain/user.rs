//! User identity and verification aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Places orders.
    Client,
    /// Owns restaurants and their menus.
    Owner,
    /// Picks up and delivers cooked orders.
    Delivery,
}

impl Role {
    /// Stable lowercase identifier used in storage and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Owner => "owner",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "client" => Ok(Self::Client),
            "owner" => Ok(Self::Owner),
            "delivery" => Ok(Self::Delivery),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// An account holder.
///
/// ## Invariants
/// - `email` is unique across users (enforced by the repository).
/// - `password_hash` is a bcrypt hash, never the raw credential.
/// - editing the email resets `verified` until the new address is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Bcrypt hash of the credential; excluded from every outbound payload.
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a user row that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// One-time email verification code bound to a user.
///
/// Created at signup and whenever the email changes; deleted once consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub id: i32,
    pub code: String,
    pub user_id: i32,
}
