//! Expenses module.
//!
//! Dated expense records, each filed under one of the owner's categories.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
