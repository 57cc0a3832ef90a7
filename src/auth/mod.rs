pub mod password;

pub use password::{Bcrypt, PasswordHasher};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in every issued bearer token: the minimal public user
/// payload plus standard timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Username.
    pub sub: String,
    pub first_name: String,
    pub last_name: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("password hashing failed: {0}")]
    Hashing(bcrypt::BcryptError),
}

/// A freshly signed token and its lifetime in seconds.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and verifies signed, time-limited bearer tokens (HS256).
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiry_days: i64) -> Self {
        Self { secret: secret.into(), expiry: Duration::days(expiry_days) }
    }

    /// Sign a token carrying the user's public payload.
    pub fn issue(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<IssuedToken, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        tracing::debug!(user = username, "issuing token");

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AuthError::Signing)?;

        Ok(IssuedToken { token, expires_in: self.expiry.num_seconds() })
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}
