//! Session token issuance.
//!
//! Tokens are signed, self-contained JWTs embedding the account's
//! identity claims plus issued-at and expiry timestamps. They are never
//! stored server-side and have no lifecycle beyond the embedded expiry.
//! Verifying and parsing tokens on later requests belongs to the
//! transport-layer collaborator, not this core.

use crate::config::Config;
use crate::errors::AuthError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Identity claims the credential service hands to the issuer.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// Wire-format JWT claims.
///
/// The `sub` and `username` fields identify a person and should not be
/// exposed in logs, so `Debug` is implemented by hand with redaction.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account id, decimal string).
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl fmt::Debug for SessionClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClaims")
            .field("sub", &"[REDACTED]")
            .field("username", &"[REDACTED]")
            .field("role", &self.role)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Mints a signed, time-bounded session token from identity claims.
/// The expiry window is the issuer's configuration, not the caller's
/// decision.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<String, AuthError>;
}

/// HS256 JWT issuer with an injected, immutable signing secret.
///
/// Key lifecycle and rotation live outside this core; the issuer only
/// ever sees the one secret it was constructed with.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("encoding_key", &"[REDACTED]")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtIssuer {
    pub fn new(signing_key: &[u8], ttl_seconds: i64) -> Result<Self, AuthError> {
        if ttl_seconds <= 0 {
            return Err(AuthError::Crypto(format!(
                "Invalid token TTL: {}",
                ttl_seconds
            )));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            ttl_seconds,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        Self::new(&config.signing_key, config.token_ttl_seconds)
    }
}

impl TokenIssuer for JwtIssuer {
    #[instrument(skip_all)]
    fn issue(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let session = SessionClaims {
            sub: claims.id.to_string(),
            username: claims.username.clone(),
            role: claims.role.clone(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let header = Header::new(Algorithm::HS256);
        encode(&header, &session, &self.encoding_key)
            .map_err(|e| AuthError::Crypto(format!("JWT signing operation failed: {}", e)))
    }
}
