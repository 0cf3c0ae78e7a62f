//! # Spendwise Core
//!
//! Core types shared by every Spendwise crate:
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion, and the
//!   [`AuthError`] taxonomy of the authentication core
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use spendwise_core::{AppError, AuthError, hash_password, verify_password};
//!
//! let digest = hash_password("pw123")?;
//! if !verify_password("pw123", &digest)? {
//!     return Err(AppError::from(AuthError::InvalidCredentials));
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError};
pub use password::{hash_password, verify_dummy_password, verify_password};
