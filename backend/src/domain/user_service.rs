//! Account service implementing the [`UserAccounts`] driving port.
//!
//! Signup, login, profile edits, and email verification. Verification codes
//! are random UUIDs; delivery is fire-and-forget so a flaky mail provider
//! never blocks account creation.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    CreateAccountRequest, EditProfileRequest, PasswordHasher, TokenService, UserAccounts,
    UserRepository, VerificationMailer, VerificationRepository,
};
use crate::domain::user::{NewUser, User};

fn fault(message: &str, error: &dyn std::fmt::Display) -> Error {
    tracing::error!(error = %error, "account operation failed");
    Error::internal(message)
}

/// Account service over user and verification storage plus the credential,
/// token, and mail adapters.
pub struct UserService<U, V, H, T, M> {
    users: Arc<U>,
    verifications: Arc<V>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    mailer: Arc<M>,
}

impl<U, V, H, T, M> UserService<U, V, H, T, M> {
    /// Create the service from its collaborators.
    pub fn new(
        users: Arc<U>,
        verifications: Arc<V>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        mailer: Arc<M>,
    ) -> Self {
        Self {
            users,
            verifications,
            hasher,
            tokens,
            mailer,
        }
    }
}

impl<U, V, H, T, M> UserService<U, V, H, T, M>
where
    M: VerificationMailer,
{
    async fn send_code(&self, email: &str, code: &str) {
        if let Err(error) = self.mailer.send_verification_email(email, code).await {
            tracing::warn!(error = %error, "verification email not delivered");
        }
    }
}

#[async_trait]
impl<U, V, H, T, M> UserAccounts for UserService<U, V, H, T, M>
where
    U: UserRepository,
    V: VerificationRepository,
    H: PasswordHasher,
    T: TokenService,
    M: VerificationMailer,
{
    async fn create_account(&self, request: CreateAccountRequest) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(|error| fault("Couldn't create account", &error))?;
        if existing.is_some() {
            return Err(Error::conflict("There is a user with that email already"));
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(|error| fault("Couldn't create account", &error))?;
        let user = self
            .users
            .insert(NewUser {
                email: request.email,
                password_hash,
                role: request.role,
            })
            .await
            .map_err(|error| fault("Couldn't create account", &error))?;

        let code = Uuid::new_v4().to_string();
        let verification = self
            .verifications
            .create(user.id, &code)
            .await
            .map_err(|error| fault("Couldn't create account", &error))?;
        self.send_code(&user.email, &verification.code).await;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|error| fault("Can't log user in.", &error))?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let matches = self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(|error| fault("Can't log user in.", &error))?;
        if !matches {
            return Err(Error::unauthorized("Wrong password"));
        }

        self.tokens
            .sign(user.id)
            .map_err(|error| fault("Can't log user in.", &error))
    }

    async fn find_by_id(&self, id: i32) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|error| fault("User Not Found", &error))?
            .ok_or_else(|| Error::not_found("User Not Found"))
    }

    async fn edit_profile(&self, user_id: i32, request: EditProfileRequest) -> Result<(), Error> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|error| fault("Could not update profile.", &error))?
            .ok_or_else(|| Error::not_found("User Not Found"))?;

        if let Some(email) = request.email {
            if email != user.email {
                let taken = self
                    .users
                    .find_by_email(&email)
                    .await
                    .map_err(|error| fault("Could not update profile.", &error))?;
                if taken.is_some() {
                    return Err(Error::conflict("There is a user with that email already"));
                }

                user.email = email;
                user.verified = false;
                let code = Uuid::new_v4().to_string();
                let verification = self
                    .verifications
                    .replace_for_user(user.id, &code)
                    .await
                    .map_err(|error| fault("Could not update profile.", &error))?;
                self.send_code(&user.email, &verification.code).await;
            }
        }

        if let Some(password) = request.password {
            user.password_hash = self
                .hasher
                .hash(&password)
                .map_err(|error| fault("Could not update profile.", &error))?;
        }

        self.users
            .update(&user)
            .await
            .map_err(|error| fault("Could not update profile.", &error))
    }

    async fn verify_email(&self, code: &str) -> Result<(), Error> {
        let found = self
            .verifications
            .find_by_code(code)
            .await
            .map_err(|error| fault("Could not verify email.", &error))?;
        let Some((verification, mut user)) = found else {
            return Err(Error::not_found("Verification not found."));
        };

        user.verified = true;
        self.users
            .update(&user)
            .await
            .map_err(|error| fault("Could not verify email.", &error))?;
        self.verifications
            .delete(verification.id)
            .await
            .map_err(|error| fault("Could not verify email.", &error))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
