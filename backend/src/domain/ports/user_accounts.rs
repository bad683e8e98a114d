//! Driving port for account management.

use async_trait::async_trait;

use crate::domain::user::{Role, User};
use crate::domain::Error;

/// Fields required to open an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Use-case surface for signup, login, and profile management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Open an account, issue a verification code, and send the mail.
    async fn create_account(&self, request: CreateAccountRequest) -> Result<(), Error>;

    /// Check credentials and return a signed token.
    async fn login(&self, email: &str, password: &str) -> Result<String, Error>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: i32) -> Result<User, Error>;

    /// Edit the caller's profile; an email change resets verification.
    async fn edit_profile(&self, user_id: i32, request: EditProfileRequest) -> Result<(), Error>;

    /// Consume a verification code and mark its user verified.
    async fn verify_email(&self, code: &str) -> Result<(), Error>;
}
