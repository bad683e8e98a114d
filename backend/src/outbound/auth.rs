//! Token and credential adapters.
//!
//! `JwtTokenService` signs the numeric user id into a JWT with an expiry;
//! `BcryptPasswordHasher` wraps bcrypt for credential storage. Both implement
//! their domain ports so services stay ignorant of the concrete schemes.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CredentialError, PasswordHasher, TokenError, TokenService};

/// Claims carried inside the signed token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i32,
    exp: i64,
}

/// JWT-backed implementation of the `TokenService` port.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtTokenService {
    /// Create a signer/verifier over a shared secret.
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }
}

impl TokenService for JwtTokenService {
    fn sign(&self, user_id: i32) -> Result<String, TokenError> {
        let claims = Claims {
            id: user_id,
            exp: (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<i32, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.id)
            .map_err(|err| TokenError::verification(err.to_string()))
    }
}

/// Bcrypt-backed implementation of the `PasswordHasher` port.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher with the bcrypt default cost.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Hasher with an explicit cost. Low costs are only suitable for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        bcrypt::hash(password, self.cost).map_err(|err| CredentialError::new(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        bcrypt::verify(password, hash).map_err(|err| CredentialError::new(err.to_string()))
    }
}
