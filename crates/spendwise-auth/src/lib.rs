//! # Spendwise Auth
//!
//! Token issuance for the Spendwise API.
//!
//! - [`claims`]: access token claim structure
//! - [`jwt`]: access token creation and verification
//! - [`refresh`]: opaque refresh token generation
//! - [`pair`]: minting an access/refresh pair together
//!
//! # Token Types
//!
//! - **Access Token** ([`Claims`]): signed, self-verifying, 15 minutes by
//!   default. Checked without touching the database.
//! - **Refresh Token**: 64 hex characters from the OS random source, 7 days
//!   by default. Only valid while a stored record holds it; rotated on every
//!   use.
//!
//! # Example
//!
//! ```ignore
//! use spendwise_auth::{issue_token_pair, verify_access_token};
//! use spendwise_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let issued = issue_token_pair(user_id, chrono::Utc::now(), &config)?;
//! let claims = verify_access_token(&issued.access_token, &config)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod pair;
pub mod refresh;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, create_access_token_at, verify_access_token};
pub use pair::{IssuedTokens, issue_token_pair};
pub use refresh::{generate_refresh_token, refresh_token_expires_at};
