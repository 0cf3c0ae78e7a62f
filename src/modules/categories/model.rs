//! Expense category models and DTOs.
//!
//! Re-exports category models from the `spendwise-models` crate.

pub use spendwise_models::categories::*;
