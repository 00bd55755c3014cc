//! Error types for the credential-issuance core.
//!
//! Every failure is a distinct, inspectable kind. All of them are
//! terminal for the current call; nothing is retried internally.

use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Email is already in use")]
    DuplicateEmail,

    /// Covers both unknown-username and wrong-password failures so the
    /// caller cannot enumerate which usernames exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl From<StoreError> for AuthError {
    /// A late uniqueness rejection at insertion time is the same
    /// user-facing outcome as a failed pre-check.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AuthError::DuplicateUsername,
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            StoreError::Unavailable(reason) => AuthError::StoreUnavailable(reason),
        }
    }
}
