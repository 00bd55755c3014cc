//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for session token validation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Session token claims structure
#[derive(Debug, Deserialize)]
struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Custom assertions for issued session tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("1")
///     .assert_username("alice")
///     .assert_role("USER");
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a valid HS256 JWT
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject (account id)
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token carries the specified username claim
    fn assert_username(&self, username: &str) -> &Self;

    /// Assert that the token carries the specified role claim
    fn assert_role(&self, role: &str) -> &Self;

    /// Assert that the token expires exactly `seconds` after issuance
    fn assert_expiry_window(&self, seconds: i64) -> &Self;

    /// Assert that the token's signature verifies under the given
    /// HS256 secret
    fn assert_signed_with(&self, secret: &[u8]) -> &Self;
}

fn decode_claims(token: &str) -> SessionClaims {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("Failed to base64 decode JWT payload");
    serde_json::from_slice(&payload).expect("Failed to parse JWT claims JSON")
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");

        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        // Payload must parse as session claims
        let _ = decode_claims(self);

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Token subject mismatch: expected '{}', got '{}'",
            subject, claims.sub
        );
        self
    }

    fn assert_username(&self, username: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.username, username,
            "Token username mismatch: expected '{}', got '{}'",
            username, claims.username
        );
        self
    }

    fn assert_role(&self, role: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.role, role,
            "Token role mismatch: expected '{}', got '{}'",
            role, claims.role
        );
        self
    }

    fn assert_expiry_window(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Token expiry window mismatch"
        );
        self
    }

    fn assert_signed_with(&self, secret: &[u8]) -> &Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        let result = decode::<SessionClaims>(self, &DecodingKey::from_secret(secret), &validation);
        assert!(
            result.is_ok(),
            "Token signature verification failed: {:?}",
            result.err()
        );

        self
    }
}
