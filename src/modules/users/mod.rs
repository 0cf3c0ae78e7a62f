//! Users module.
//!
//! Account persistence used by registration, login and the auth gate, plus
//! the caller's own profile endpoint.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
