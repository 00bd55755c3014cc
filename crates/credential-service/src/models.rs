//! Data models for accounts and the register/login request surface.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Role assigned to every newly registered account.
pub const DEFAULT_ROLE: &str = "USER";

/// A stored account identity.
///
/// Owned exclusively by the identity store; the credential service
/// never caches or mutates one outside a store call. The password hash
/// is opaque bcrypt output, never the raw secret.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// An account as handed to the store for insertion. The store assigns
/// the identifier and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub enabled: bool,
}

/// Registration input. The password is a [`SecretString`] so a derived
/// `Debug` (and anything tracing it) shows `[REDACTED]` instead of the
/// raw secret, and the memory is zeroized on drop.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Login input.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Successful outcome of register or login: a fresh session token plus
/// the account's public identity claims.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}
