//! User data models.
//!
//! Re-exports the user entities from the `spendwise-models` crate.

pub use spendwise_models::users::*;
