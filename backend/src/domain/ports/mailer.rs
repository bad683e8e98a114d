//! Outbound email port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by mail adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mail delivery failed: {message}")]
pub struct MailerError {
    pub message: String,
}

impl MailerError {
    /// Helper carrying the adapter's failure detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends account verification codes.
///
/// Callers treat delivery as fire-and-forget: a failed send is logged and
/// never fails the surrounding operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Send a verification code to an address.
    async fn send_verification_email(&self, email: &str, code: &str) -> Result<(), MailerError>;
}
