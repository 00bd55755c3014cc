//! Credential Service Library
//!
//! This library provides the credential-issuance core: it registers new
//! account identities, authenticates existing ones, and issues signed
//! session tokens. Persistence internals, the HTTP transport, and
//! signing-key rotation live behind collaborator seams and are out of
//! scope here.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `hasher` - Password hashing collaborator (bcrypt)
//! - `models` - Data models
//! - `service` - Registration and login orchestration
//! - `store` - Identity store collaborator seam
//! - `token` - Session token issuance (JWT)

pub mod config;
pub mod errors;
pub mod hasher;
pub mod models;
pub mod service;
pub mod store;
pub mod token;

pub use config::Config;
pub use errors::AuthError;
pub use hasher::{BcryptHasher, PasswordHasher};
pub use models::{Account, AuthResponse, LoginRequest, NewAccount, RegisterRequest};
pub use service::CredentialService;
pub use store::{IdentityStore, InMemoryIdentityStore, StoreError};
pub use token::{JwtIssuer, TokenClaims, TokenIssuer};
