//! Verification mail adapters.
//!
//! `MailgunMailer` delivers codes through the Mailgun HTTP API. `LogMailer`
//! stands in when no mail credentials are configured, logging the code so
//! local development can still complete the verification flow.

use async_trait::async_trait;

use crate::domain::ports::{MailerError, VerificationMailer};

/// Mailgun-backed implementation of the `VerificationMailer` port.
pub struct MailgunMailer {
    client: reqwest::Client,
    api_key: String,
    domain: String,
    from: String,
}

impl MailgunMailer {
    /// Create a mailer for a Mailgun domain.
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            domain: domain.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl VerificationMailer for MailgunMailer {
    async fn send_verification_email(&self, email: &str, code: &str) -> Result<(), MailerError> {
        let url = format!("https://api.mailgun.net/v3/{}/messages", self.domain);
        let body = format!("Please confirm your account with code {code}");
        let params = [
            ("from", self.from.as_str()),
            ("to", email),
            ("subject", "Verify Your Email"),
            ("text", body.as_str()),
        ];
        let response = self
            .client
            .post(url)
            .basic_auth("api", Some(&self.api_key))
            .form(&params)
            .send()
            .await
            .map_err(|err| MailerError::new(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(MailerError::new(format!(
                "mailgun returned {}",
                response.status()
            )))
        }
    }
}

/// Logging stand-in used when mail delivery is not configured.
pub struct LogMailer;

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_verification_email(&self, email: &str, code: &str) -> Result<(), MailerError> {
        tracing::info!(email, code, "mail delivery disabled; verification code logged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        LogMailer
            .send_verification_email("client@example.com", "code-123")
            .await
            .expect("log mailer never fails");
    }
}
