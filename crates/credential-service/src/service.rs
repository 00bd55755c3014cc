//! Registration and login orchestration.
//!
//! The credential service coordinates its three collaborators and does
//! no hashing or signing of its own. Each call is an independent,
//! stateless request/response operation; the only shared mutable
//! resource is the identity store.

use crate::errors::AuthError;
use crate::hasher::PasswordHasher;
use crate::models::{Account, AuthResponse, LoginRequest, NewAccount, RegisterRequest, DEFAULT_ROLE};
use crate::store::IdentityStore;
use crate::token::{TokenClaims, TokenIssuer};
use secrecy::ExposeSecret;
use tracing::{info, warn};

/// Fixed bcrypt hash verified when the username is unknown, so a login
/// against a missing account costs the same as one against a wrong
/// password and the caller cannot enumerate usernames by timing.
const DUMMY_BCRYPT_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Orchestrates registration and authentication against injected
/// collaborators, enabling substitution with test doubles.
pub struct CredentialService<S, H, T> {
    store: S,
    hasher: H,
    issuer: T,
}

impl<S, H, T> CredentialService<S, H, T>
where
    S: IdentityStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(store: S, hasher: H, issuer: T) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// Register a new account and mint a session token for it.
    ///
    /// # Steps
    ///
    /// 1. Reject a taken username, then a taken email (the order fixes
    ///    which duplicate the caller hears about first)
    /// 2. Hash the password; the raw secret is dropped with the request
    /// 3. Persist with role "USER" and enabled = true; the store
    ///    assigns the id and re-enforces uniqueness at insertion
    /// 4. Mint a session token from the persisted account's claims
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        if request.username.is_empty() {
            return Err(AuthError::InvalidRequest("username is empty".to_string()));
        }
        if request.email.is_empty() {
            return Err(AuthError::InvalidRequest("email is empty".to_string()));
        }
        if request.password.expose_secret().is_empty() {
            return Err(AuthError::InvalidRequest("password is empty".to_string()));
        }

        if self.store.exists_by_username(&request.username).await? {
            return Err(AuthError::DuplicateUsername);
        }
        if self.store.exists_by_email(&request.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.password)?;

        // A concurrent registration can still win between the checks
        // above and this insert; the store's own uniqueness enforcement
        // turns that race into the same duplicate rejection.
        let account = self
            .store
            .save(NewAccount {
                username: request.username,
                email: request.email,
                password_hash,
                role: DEFAULT_ROLE.to_string(),
                enabled: true,
            })
            .await?;

        info!(account_id = account.id, "registered new account");

        self.respond(account)
    }

    /// Authenticate an existing account and mint a session token.
    ///
    /// Unknown-username and wrong-password failures are deliberately
    /// indistinguishable. The enabled flag is only consulted after the
    /// password verified, so an unauthenticated caller never learns
    /// that an account is disabled.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let account = self.store.find_by_username(&request.username).await?;

        // Verification always runs, against a dummy hash if need be.
        let hash = account
            .as_ref()
            .map(|a| a.password_hash.as_str())
            .unwrap_or(DUMMY_BCRYPT_HASH);
        let verified = self.hasher.verify(&request.password, hash);

        let Some(account) = account else {
            warn!("login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verified {
            warn!(account_id = account.id, "login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !account.enabled {
            warn!(account_id = account.id, "login rejected: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        info!(account_id = account.id, "login succeeded");

        self.respond(account)
    }

    fn respond(&self, account: Account) -> Result<AuthResponse, AuthError> {
        let token = self.issuer.issue(&TokenClaims {
            id: account.id,
            username: account.username.clone(),
            role: account.role.clone(),
        })?;

        Ok(AuthResponse {
            token,
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
        })
    }
}
