//! Persistence port for one-time email verification codes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{User, Verification};

/// Errors raised by verification repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationRepositoryError {
    /// Repository connection could not be established.
    #[error("verification repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("verification repository query failed: {message}")]
    Query { message: String },
}

impl VerificationRepositoryError {
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

/// Port for verification code storage.
///
/// A user holds at most one live code; `replace_for_user` discards any
/// previous code before inserting the new one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Insert a code for a user who has none yet.
    async fn create(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<Verification, VerificationRepositoryError>;

    /// Drop any existing code for the user and insert a fresh one.
    async fn replace_for_user(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<Verification, VerificationRepositoryError>;

    /// Resolve a code to its verification record and owning user.
    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<(Verification, User)>, VerificationRepositoryError>;

    /// Delete a consumed verification.
    async fn delete(&self, id: i32) -> Result<(), VerificationRepositoryError>;
}
