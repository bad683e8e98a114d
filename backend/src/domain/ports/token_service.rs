//! Credential token port.

use thiserror::Error;

/// Errors raised by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token could not be produced.
    #[error("token signing failed: {message}")]
    Signing { message: String },
    /// The token is malformed, expired, or carries a bad signature.
    #[error("token verification failed: {message}")]
    Verification { message: String },
}

impl TokenError {
    /// Helper for signing failures.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Helper for verification failures.
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }
}

/// Issues an opaque signed token from a numeric identity and verifies it back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a user id into an opaque token.
    fn sign(&self, user_id: i32) -> Result<String, TokenError>;

    /// Verify a token back into the user id it was signed from.
    fn verify(&self, token: &str) -> Result<i32, TokenError>;
}
