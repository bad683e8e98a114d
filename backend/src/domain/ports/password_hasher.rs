//! Credential hashing port.

use thiserror::Error;

/// Errors raised by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("credential hashing failed: {message}")]
pub struct CredentialError {
    pub message: String,
}

impl CredentialError {
    /// Helper carrying the adapter's failure detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Hashes raw credentials for storage and checks candidates against hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a storable hash of a raw credential.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Check a candidate credential against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}
