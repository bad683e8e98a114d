//! Persistence port for user aggregates.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for user storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the persisted row.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a user by primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by email, including the credential hash for login.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Persist changed fields of an existing user.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
}
