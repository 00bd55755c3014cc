//! Service configuration loaded from environment variables.

use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default bcrypt work factor for password hashing.
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Lowest acceptable bcrypt cost. Anything below this is too fast to
/// qualify as a slow, salted KDF.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest acceptable bcrypt cost before hashing latency becomes a
/// denial-of-service vector on the login path.
pub const MAX_BCRYPT_COST: u32 = 14;

/// Default session token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Minimum signing key length in bytes (256 bits for HS256).
const MIN_SIGNING_KEY_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret for session token signing. Injected, immutable for
    /// the lifetime of the process; rotation is handled outside this
    /// core.
    pub signing_key: Vec<u8>,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing key: {0}")]
    InvalidSigningKey(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Invalid bcrypt cost: {0} (must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST})")]
    InvalidBcryptCost(u32),

    #[error("Invalid token TTL: {0}")]
    InvalidTokenTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let signing_key_base64 = vars
            .get("TOKEN_SIGNING_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_SIGNING_KEY".to_string()))?;

        let signing_key = general_purpose::STANDARD
            .decode(signing_key_base64)
            .map_err(ConfigError::Base64Error)?;

        if signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::InvalidSigningKey(format!(
                "Expected at least {} bytes, got {}",
                MIN_SIGNING_KEY_BYTES,
                signing_key.len()
            )));
        }

        let token_ttl_seconds = match vars.get("TOKEN_TTL_SECONDS") {
            Some(raw) => {
                let ttl: i64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTokenTtl(raw.clone()))?;
                if ttl <= 0 {
                    return Err(ConfigError::InvalidTokenTtl(raw.clone()));
                }
                ttl
            }
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidBcryptCost(0))?,
            None => DEFAULT_BCRYPT_COST,
        };

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(bcrypt_cost));
        }

        Ok(Config {
            signing_key,
            token_ttl_seconds,
            bcrypt_cost,
        })
    }
}
