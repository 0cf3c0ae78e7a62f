//! Expense models and DTOs.
//!
//! Re-exports expense models from the `spendwise-models` crate.

pub use spendwise_models::expenses::*;
