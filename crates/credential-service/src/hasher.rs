//! Password hashing collaborator.
//!
//! Hashing must be slow and salted; bcrypt embeds a random salt in the
//! hash output, so hashing the same password twice yields different
//! strings that both verify.

use crate::config::{Config, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::AuthError;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

/// One-way hash and verify capability consumed by the credential
/// service.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password. The raw secret is only exposed for the
    /// duration of the call.
    fn hash(&self, password: &SecretString) -> Result<String, AuthError>;

    /// Verify a raw password against a stored hash. Returns false on a
    /// mismatch or a malformed hash; never errors.
    fn verify(&self, password: &SecretString, hash: &str) -> bool;
}

/// Bcrypt-backed implementation with a bounded work factor.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with an explicit cost. The cost is validated
    /// even when it came through config, so a direct caller cannot
    /// produce insecurely fast hashes.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(AuthError::Crypto(format!(
                "Invalid bcrypt cost: {} (must be {}-{})",
                cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
            )));
        }
        Ok(Self { cost })
    }

    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        Self::new(config.bcrypt_cost)
    }
}

impl PasswordHasher for BcryptHasher {
    #[instrument(skip_all)]
    fn hash(&self, password: &SecretString) -> Result<String, AuthError> {
        bcrypt::hash(password.expose_secret(), self.cost)
            .map_err(|e| AuthError::Crypto(format!("Password hashing failed: {}", e)))
    }

    #[instrument(skip_all)]
    fn verify(&self, password: &SecretString, hash: &str) -> bool {
        bcrypt::verify(password.expose_secret(), hash).unwrap_or(false)
    }
}
