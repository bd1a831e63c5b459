//! Session-bound JWT access tokens.
//!
//! Tokens are HS256-signed and carry the admin id (`sub`) and the server-side
//! session id (`sid`). `exp` is pinned to the session's lifetime cap, so a
//! token never outlives its session even if the session row is lost; idle
//! expiry is enforced against the session row on every request.

use chrono::Duration;
use jambakan_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the admin's internal database id.
    pub sub: DbId,
    /// The `admin_sessions` row this token belongs to.
    pub sid: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from `JWT_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Issue a token for `session_id`, expiring at `started_at + lifetime`.
pub fn generate_access_token(
    user_id: DbId,
    session_id: DbId,
    started_at: Timestamp,
    lifetime: Duration,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        sid: session_id,
        exp: (started_at + lifetime).timestamp(),
        iat: chrono::Utc::now().timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
