//! Identity store collaborator seam.
//!
//! The credential service only ever talks to the store through the
//! [`IdentityStore`] trait, so a durable backend can be swapped in
//! without touching the orchestration logic. The store is the sole
//! owner of account records and must enforce username/email uniqueness
//! at insertion time, independent of any pre-checks the service runs.

use crate::models::{Account, NewAccount};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures surfaced by an identity store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insertion rejected because the username is already taken.
    #[error("username already exists")]
    DuplicateUsername,

    /// Insertion rejected because the email is already in use.
    #[error("email already exists")]
    DuplicateEmail,

    /// The backend could not serve the request (connectivity, timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable record of accounts, queried and mutated by the credential
/// service. Implementations assign the identifier on [`save`] and must
/// reject inserts that would violate the uniqueness invariant.
///
/// [`save`]: IdentityStore::save
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new account. The store assigns the id and creation
    /// timestamp, and enforces uniqueness under whatever concurrency
    /// discipline the backend provides.
    async fn save(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
}

#[async_trait]
impl<T: IdentityStore + ?Sized> IdentityStore for std::sync::Arc<T> {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        (**self).exists_by_username(username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        (**self).exists_by_email(email).await
    }

    async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
        (**self).save(account).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        (**self).find_by_username(username).await
    }
}

/// In-memory identity store.
///
/// Backs tests and local composition. Uniqueness is checked under the
/// write lock, so two racing `save` calls for the same identity resolve
/// the way a database unique constraint would: one wins, the other gets
/// a duplicate rejection.
#[derive(Debug)]
pub struct InMemoryIdentityStore {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Flip the enabled flag on an existing account. Returns false if
    /// no account has the given username.
    ///
    /// Administrative state changes are outside the credential
    /// service's surface; this exists so tests can stage disabled
    /// accounts.
    pub async fn set_enabled(&self, username: &str, enabled: bool) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.values_mut().find(|a| a.username == username) {
            Some(account) => {
                account.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn save(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        // Uniqueness invariant, enforced at insertion while holding the
        // write lock.
        if accounts.values().any(|a| a.username == account.username) {
            return Err(StoreError::DuplicateUsername);
        }
        if accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let persisted = Account {
            id,
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            enabled: account.enabled,
            created_at: Utc::now(),
        };

        accounts.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }
}
