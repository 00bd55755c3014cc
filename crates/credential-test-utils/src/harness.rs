//! Pre-wired credential service fixtures for integration tests.

use credential_service::config::MIN_BCRYPT_COST;
use credential_service::{
    BcryptHasher, CredentialService, InMemoryIdentityStore, JwtIssuer, LoginRequest,
    RegisterRequest,
};
use secrecy::SecretString;
use std::sync::Arc;

/// Fixed HS256 signing secret for test tokens (32 bytes).
pub const TEST_SIGNING_KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

/// Session token lifetime used by the harness issuer.
pub const TEST_TOKEN_TTL_SECONDS: i64 = 3600;

/// Service type produced by the harness.
pub type TestService = CredentialService<Arc<InMemoryIdentityStore>, BcryptHasher, JwtIssuer>;

/// A credential service wired with the in-memory store, a minimum-cost
/// bcrypt hasher (fast tests, still salted), and a fixed-secret issuer.
pub fn test_service() -> TestService {
    test_service_with_store(Arc::new(InMemoryIdentityStore::new()))
}

/// Same wiring as [`test_service`] but over a caller-held store handle,
/// for tests that need to stage or inspect records directly.
pub fn test_service_with_store(store: Arc<InMemoryIdentityStore>) -> TestService {
    CredentialService::new(
        store,
        BcryptHasher::new(MIN_BCRYPT_COST).expect("minimum bcrypt cost is valid"),
        JwtIssuer::new(TEST_SIGNING_KEY, TEST_TOKEN_TTL_SECONDS).expect("test issuer is valid"),
    )
}

pub fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: SecretString::from(password),
    }
}

pub fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: SecretString::from(password),
    }
}
