//! Opaque refresh token generation.
//!
//! Refresh tokens carry no claims. A token is only as good as the stored
//! record that holds it, so uniqueness is enforced by the store's unique
//! constraint rather than here.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;

use spendwise_config::JwtConfig;
use spendwise_core::AuthError;

/// Random bytes per token; hex encoding doubles the length.
pub const REFRESH_TOKEN_BYTES: usize = 32;
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

/// Generates a 64-character hex token from the operating system CSPRNG.
///
/// # Errors
///
/// Returns [`AuthError::EntropyFailure`] if the random source fails.
pub fn generate_refresh_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::EntropyFailure(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// Expiry of a refresh token issued at `now`.
pub fn refresh_token_expires_at(now: DateTime<Utc>, jwt_config: &JwtConfig) -> DateTime<Utc> {
    now + Duration::seconds(jwt_config.refresh_token_expiry)
}
