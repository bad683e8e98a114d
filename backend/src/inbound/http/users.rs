//! Account HTTP handlers.
//!
//! ```text
//! POST  /api/users
//! POST  /api/users/login
//! POST  /api/users/verify-email
//! GET   /api/users/me
//! GET   /api/users/{id}
//! PATCH /api/users/me
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ApiResult;
use crate::domain::ports::{CreateAccountRequest, EditProfileRequest};
use crate::domain::user::{Role, User};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;

/// Request payload for opening an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountBody {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Request payload for logging in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Request payload for editing the caller's profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request payload for consuming a verification code.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailBody {
    pub code: String,
}

/// User shape exposed to clients; the credential hash never leaves the domain.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            verified: user.verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct UserPayload {
    user: UserResponse,
}

#[derive(Debug, Serialize)]
struct TokenPayload {
    token: String,
}

/// Open an account.
#[post("/users")]
pub async fn create_account(
    state: web::Data<HttpState>,
    body: web::Json<CreateAccountBody>,
) -> HttpResponse {
    let body = body.into_inner();
    envelope::respond_empty(
        state
            .accounts
            .create_account(CreateAccountRequest {
                email: body.email,
                password: body.password,
                role: body.role,
            })
            .await,
    )
}

/// Exchange credentials for a signed token.
#[post("/users/login")]
pub async fn login(state: web::Data<HttpState>, body: web::Json<LoginBody>) -> HttpResponse {
    let result = state
        .accounts
        .login(&body.email, &body.password)
        .await
        .map(|token| TokenPayload { token });
    envelope::respond(result)
}

/// Consume a verification code.
#[post("/users/verify-email")]
pub async fn verify_email(
    state: web::Data<HttpState>,
    body: web::Json<VerifyEmailBody>,
) -> HttpResponse {
    envelope::respond_empty(state.accounts.verify_email(&body.code).await)
}

/// The caller's own account.
#[get("/users/me")]
pub async fn me(auth: AuthContext) -> ApiResult<HttpResponse> {
    let user = auth.require("me")?.clone();
    Ok(envelope::ok(UserPayload { user: user.into() }))
}

/// Another user's profile.
#[get("/users/{id}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    auth.require("user_profile")?;
    let result = state
        .accounts
        .find_by_id(path.into_inner())
        .await
        .map(|user| UserPayload { user: user.into() });
    Ok(envelope::respond(result))
}

/// Edit the caller's profile.
#[patch("/users/me")]
pub async fn edit_profile(
    state: web::Data<HttpState>,
    auth: AuthContext,
    body: web::Json<EditProfileBody>,
) -> ApiResult<HttpResponse> {
    let user = auth.require("edit_profile")?;
    let user_id = user.id;
    let body = body.into_inner();
    Ok(envelope::respond_empty(
        state
            .accounts
            .edit_profile(
                user_id,
                EditProfileRequest {
                    email: body.email,
                    password: body.password,
                },
            )
            .await,
    ))
}
