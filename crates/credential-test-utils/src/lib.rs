//! Test utilities for the credential service.
//!
//! Provides trait-based token assertions and a pre-wired service
//! harness so integration tests read as scenarios rather than setup.

pub mod assertions;
pub mod harness;

pub use assertions::TokenAssertions;
pub use harness::{
    login_request, register_request, test_service, test_service_with_store, TestService,
    TEST_SIGNING_KEY,
};

/// Initialize tracing output for tests. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
