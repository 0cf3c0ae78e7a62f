//! Authentication request and response bodies.
//!
//! Re-exports the auth DTOs and refresh token records from the
//! `spendwise-models` crate.

pub use spendwise_models::auth::*;
pub use spendwise_models::refresh_tokens::RefreshToken;
