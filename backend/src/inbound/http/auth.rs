//! Request authentication and the pre-dispatch policy gate.
//!
//! The extractor resolves a bearer token to its user before the handler
//! runs; handlers then gate themselves against the static policy table.
//! An invalid or stale token yields an anonymous context rather than an
//! immediate rejection, because public operations must keep working.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;
use crate::domain::access;
use crate::domain::user::User;
use crate::inbound::http::state::HttpState;

/// Authenticated identity resolved from the request, if any.
#[derive(Clone)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    /// Context with no identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context carrying a resolved identity.
    #[must_use]
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// The resolved identity, if the request carried a valid token.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Gate an operation against the policy table.
    ///
    /// Public operations pass any context through. Guarded operations reject
    /// anonymous callers with 401 and wrong roles with 403.
    pub fn authorize(&self, operation: &str) -> Result<Option<&User>, Error> {
        let Some(policy) = access::policy(operation) else {
            return Ok(self.user.as_ref());
        };
        let Some(user) = self.user.as_ref() else {
            return Err(Error::unauthorized("Authentication required"));
        };
        if access::is_allowed(Some(policy), Some(user)) {
            Ok(Some(user))
        } else {
            Err(Error::forbidden("Forbidden"))
        }
    }

    /// Gate an operation whose policy always requires an identity.
    pub fn require(&self, operation: &str) -> Result<&User, Error> {
        self.authorize(operation)?
            .ok_or_else(|| Error::unauthorized("Authentication required"))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_owned())
}

async fn resolve(req: HttpRequest) -> AuthContext {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        return AuthContext::anonymous();
    };
    let Some(token) = bearer_token(&req) else {
        return AuthContext::anonymous();
    };
    let user_id = match state.tokens.verify(&token) {
        Ok(id) => id,
        Err(error) => {
            tracing::debug!(error = %error, "rejected bearer token");
            return AuthContext::anonymous();
        }
    };
    match state.accounts.find_by_id(user_id).await {
        Ok(user) => AuthContext::authenticated(user),
        Err(error) => {
            tracing::debug!(error = %error, "bearer token names an unknown user");
            AuthContext::anonymous()
        }
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { Ok(resolve(req).await) })
    }
}
