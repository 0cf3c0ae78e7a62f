//! Token signing configuration.
//!
//! The signing secret is read once at startup and carried in application
//! state; request handling never reads it from the environment.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, non-empty)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 900)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 604800)

use std::env;
use std::fmt;

use thiserror::Error;

/// 15 minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
/// 7 days.
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable not set")]
    MissingSecret,
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidExpiry { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Builds a config with the default token lifetimes.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        Ok(Self {
            secret,
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        let mut config = Self::new(secret)?;

        if let Some(expiry) = read_expiry("JWT_ACCESS_EXPIRY")? {
            config.access_token_expiry = expiry;
        }
        if let Some(expiry) = read_expiry("JWT_REFRESH_EXPIRY")? {
            config.refresh_token_expiry = expiry;
        }

        Ok(config)
    }

    /// Loads the config from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty, or an expiry is not a
    /// positive integer. Call once at startup.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| panic!("Invalid JWT configuration: {e}"))
    }
}

fn read_expiry(name: &'static str) -> Result<Option<i64>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_expiry(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_expiry(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|seconds| *seconds > 0)
        .ok_or_else(|| ConfigError::InvalidExpiry {
            name,
            value: value.to_string(),
        })
}
