//! Password hashing and verification using bcrypt.
//!
//! Digests are salted per call and use [`bcrypt::DEFAULT_COST`], so hashing
//! the same password twice yields different strings.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AuthError;

/// Hashes a plaintext password.
///
/// # Errors
///
/// Returns [`AuthError::HashingFailure`] if bcrypt cannot produce a digest.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash(password, DEFAULT_COST).map_err(|e| AuthError::HashingFailure(e.to_string()))
}

/// Verifies a plaintext password against a stored digest.
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns [`AuthError::HashingFailure`] if `hash` is not a valid bcrypt digest.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    verify(password, hash).map_err(|e| AuthError::HashingFailure(e.to_string()))
}

// Computed once at DEFAULT_COST so a dummy check costs the same as a real one.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("spendwise-dummy-password", DEFAULT_COST).ok());

/// Runs a full bcrypt verification against a fixed digest and discards the
/// outcome.
///
/// Call this when no stored digest exists for a login attempt, so a missing
/// account takes as long to reject as a wrong password.
pub fn verify_dummy_password(password: &str) {
    if let Some(digest) = DUMMY_HASH.as_deref() {
        let _ = verify(password, digest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("pw123").unwrap();

        assert_ne!(hashed, "pw123");
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("pw123", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hashed = hash_password("correct horse").unwrap();

        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn test_dummy_digest_uses_default_cost() {
        let digest = DUMMY_HASH.as_deref().unwrap();

        assert!(digest.starts_with(&format!("$2b${DEFAULT_COST:02}$")));
        assert!(!verify_password("pw123", digest).unwrap());
    }

    #[test]
    fn test_dummy_verify_costs_a_real_verify() {
        // Warm the digest so only verification is timed.
        verify_dummy_password("warmup");
        let hashed = hash_password("pw123").unwrap();

        let start = std::time::Instant::now();
        verify_password("wrong", &hashed).unwrap();
        let real = start.elapsed();

        let start = std::time::Instant::now();
        verify_dummy_password("wrong");
        let dummy = start.elapsed();

        assert!(dummy * 4 >= real, "dummy={dummy:?} real={real:?}");
    }

    #[test]
    fn test_malformed_digest_is_hashing_failure() {
        let result = verify_password("pw123", "not-a-bcrypt-digest");

        assert!(matches!(result, Err(AuthError::HashingFailure(_))));
    }
}
