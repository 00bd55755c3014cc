//! End-to-end registration and login scenarios over the in-memory
//! identity store.

use credential_service::models::DEFAULT_ROLE;
use credential_service::{
    Account, AuthError, IdentityStore, InMemoryIdentityStore, NewAccount, StoreError,
};
use credential_test_utils::{
    init_tracing, login_request, register_request, test_service, test_service_with_store,
    TokenAssertions,
};
use std::sync::Arc;

#[tokio::test]
async fn test_register_then_login_round_trip() {
    init_tracing();
    let service = test_service();

    let registered = service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("registration should succeed");

    registered
        .token
        .assert_valid_jwt()
        .assert_username("alice")
        .assert_role(DEFAULT_ROLE);

    let logged_in = service
        .login(login_request("alice", "secret123"))
        .await
        .expect("login should succeed");

    // Both tokens assert the same account id.
    assert_eq!(logged_in.id, registered.id);
    logged_in
        .token
        .assert_valid_jwt()
        .assert_signed_with(credential_test_utils::TEST_SIGNING_KEY)
        .assert_for_subject(&registered.id.to_string());
}

#[tokio::test]
async fn test_duplicate_username_rejected_without_new_record() {
    let store = Arc::new(InMemoryIdentityStore::new());
    let service = test_service_with_store(Arc::clone(&store));

    service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("first registration should succeed");

    let result = service
        .register(register_request("alice", "bob@x.com", "other"))
        .await;

    assert!(matches!(result, Err(AuthError::DuplicateUsername)));
    assert_eq!(store.count().await, 1, "failing call must not create a record");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let service = test_service();

    service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("first registration should succeed");

    let result = service
        .register(register_request("bob", "alice@x.com", "other"))
        .await;

    assert!(matches!(result, Err(AuthError::DuplicateEmail)));
}

#[tokio::test]
async fn test_username_check_takes_precedence_over_email_check() {
    let service = test_service();

    service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("first registration should succeed");

    // Both identity fields collide; the username duplicate is reported.
    let result = service
        .register(register_request("alice", "alice@x.com", "other"))
        .await;

    assert!(matches!(result, Err(AuthError::DuplicateUsername)));
}

#[tokio::test]
async fn test_invalid_credentials_indistinguishable() {
    let service = test_service();

    service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("registration should succeed");

    let wrong_password = service.login(login_request("alice", "wrong")).await;
    let unknown_user = service.login(login_request("nobody", "secret123")).await;

    let wrong_password = wrong_password.expect_err("wrong password must fail");
    let unknown_user = unknown_user.expect_err("unknown user must fail");

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    // Identical rendering: the caller sees one undifferentiated failure.
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_disabled_account_with_correct_credentials() {
    let store = Arc::new(InMemoryIdentityStore::new());
    let service = test_service_with_store(Arc::clone(&store));

    service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("registration should succeed");
    assert!(store.set_enabled("alice", false).await);

    let result = service.login(login_request("alice", "secret123")).await;
    assert!(
        matches!(result, Err(AuthError::AccountDisabled)),
        "correct credentials against a disabled account must surface AccountDisabled"
    );
}

#[tokio::test]
async fn test_alice_scenario() {
    let store = Arc::new(InMemoryIdentityStore::new());
    let service = test_service_with_store(Arc::clone(&store));

    let registered = service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("registration should succeed");
    assert_eq!(registered.role, "USER");

    let account = store
        .find_by_username("alice")
        .await
        .expect("store query")
        .expect("alice should be persisted");
    assert!(account.enabled);

    let result = service
        .register(register_request("alice", "bob@x.com", "other"))
        .await;
    assert!(matches!(result, Err(AuthError::DuplicateUsername)));

    let result = service.login(login_request("alice", "wrong")).await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    let logged_in = service
        .login(login_request("alice", "secret123"))
        .await
        .expect("login should succeed");
    logged_in.token.assert_valid_jwt().assert_username("alice");
}

#[tokio::test]
async fn test_concurrent_registrations_resolve_to_one_winner() {
    let service = Arc::new(test_service());

    // Same username, racing pre-checks. Exactly one may win; the loser
    // observes a duplicate rejection either at the pre-check or at the
    // store's insertion-time enforcement.
    let first = service.register(register_request("alice", "alice@x.com", "secret123"));
    let second = service.register(register_request("alice", "alice2@x.com", "secret456"));

    let (first, second) = tokio::join!(first, second);

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent registration may win");

    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(loser, Err(AuthError::DuplicateUsername)));
}

#[tokio::test]
async fn test_service_composed_from_config() {
    use base64::{engine::general_purpose, Engine as _};
    use credential_service::{BcryptHasher, Config, CredentialService, JwtIssuer};
    use std::collections::HashMap;

    let vars = HashMap::from([
        (
            "TOKEN_SIGNING_KEY".to_string(),
            general_purpose::STANDARD.encode(credential_test_utils::TEST_SIGNING_KEY),
        ),
        ("TOKEN_TTL_SECONDS".to_string(), "7200".to_string()),
        ("BCRYPT_COST".to_string(), "4".to_string()),
    ]);
    let config = Config::from_vars(&vars).expect("config should load");

    let service = CredentialService::new(
        InMemoryIdentityStore::new(),
        BcryptHasher::from_config(&config).expect("hasher from config"),
        JwtIssuer::from_config(&config).expect("issuer from config"),
    );

    let registered = service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await
        .expect("registration should succeed");

    registered
        .token
        .assert_valid_jwt()
        .assert_signed_with(credential_test_utils::TEST_SIGNING_KEY)
        .assert_expiry_window(7200);
}

/// Store double modeling a backend outage.
struct UnavailableStore;

#[async_trait::async_trait]
impl IdentityStore for UnavailableStore {
    async fn exists_by_username(&self, _username: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn save(&self, _account: NewAccount) -> Result<Account, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_outage_surfaces_unchanged() {
    use credential_service::config::MIN_BCRYPT_COST;
    use credential_service::{BcryptHasher, CredentialService, JwtIssuer};
    use credential_test_utils::TEST_SIGNING_KEY;

    let service = CredentialService::new(
        UnavailableStore,
        BcryptHasher::new(MIN_BCRYPT_COST).expect("valid cost"),
        JwtIssuer::new(TEST_SIGNING_KEY, 3600).expect("valid issuer"),
    );

    let register = service
        .register(register_request("alice", "alice@x.com", "secret123"))
        .await;
    assert!(
        matches!(register, Err(AuthError::StoreUnavailable(ref r)) if r == "connection refused")
    );

    let login = service.login(login_request("alice", "secret123")).await;
    assert!(matches!(login, Err(AuthError::StoreUnavailable(_))));
}
