//! Issuing an access/refresh pair in one step.

use chrono::{DateTime, Utc};

use spendwise_config::JwtConfig;
use spendwise_core::AuthError;

use crate::jwt::create_access_token_at;
use crate::refresh::{generate_refresh_token, refresh_token_expires_at};

/// Freshly minted credentials. Only `refresh_token` and `refresh_expires_at`
/// need persisting.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Mints an access token and a refresh token for `user_id` at `now`.
///
/// # Errors
///
/// [`AuthError::SigningFailure`] or [`AuthError::EntropyFailure`].
pub fn issue_token_pair(
    user_id: i64,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<IssuedTokens, AuthError> {
    let access_token = create_access_token_at(user_id, now, jwt_config)?;
    let refresh_token = generate_refresh_token()?;

    Ok(IssuedTokens {
        access_token,
        refresh_token,
        refresh_expires_at: refresh_token_expires_at(now, jwt_config),
    })
}
