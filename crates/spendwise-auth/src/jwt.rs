//! Access token signing and verification.
//!
//! Access tokens are HS256 JWTs signed with [`JwtConfig::secret`]. They are
//! valid for [`JwtConfig::access_token_expiry`] seconds and are checked
//! without any store lookup.
//!
//! # Example
//!
//! ```ignore
//! use spendwise_auth::{create_access_token, verify_access_token};
//! use spendwise_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! assert_eq!(claims.user_id, user_id);
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use spendwise_config::JwtConfig;
use spendwise_core::AuthError;

use crate::claims::Claims;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Creates an access token for `user_id`, issued now.
///
/// # Errors
///
/// Returns [`AuthError::SigningFailure`] if encoding fails.
pub fn create_access_token(user_id: i64, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    create_access_token_at(user_id, Utc::now(), jwt_config)
}

/// Creates an access token as if issued at `issued_at`.
///
/// The expiry is `issued_at + access_token_expiry`, so a token issued far
/// enough in the past is already expired.
pub fn create_access_token_at(
    user_id: i64,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        user_id,
        iat,
        exp: iat + jwt_config.access_token_expiry,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::SigningFailure(e.to_string()))
}

/// Verifies an access token and returns its claims.
///
/// Signature and expiry are checked first, with no leeway. Only then is
/// the payload read as [`Claims`].
///
/// # Errors
///
/// - [`AuthError::InvalidOrExpiredToken`]: bad shape, bad signature, wrong
///   algorithm, missing or past `exp`
/// - [`AuthError::MalformedClaims`]: the token is authentic and current but
///   `user_id` is missing or not an integer
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;

    let payload = decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthError::InvalidOrExpiredToken)?
    .claims;

    serde_json::from_value(Value::Object(payload)).map_err(|_| AuthError::MalformedClaims)
}
