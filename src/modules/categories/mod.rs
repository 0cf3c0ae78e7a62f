//! Expense categories module.
//!
//! Every query is scoped to the authenticated owner. A category that
//! belongs to someone else is indistinguishable from one that does not exist.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
