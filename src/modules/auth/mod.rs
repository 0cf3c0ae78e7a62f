//! Authentication module.
//!
//! Session lifecycle: register, login, refresh and logout. Refresh records
//! are persisted through [`token_store::RefreshTokenStore`].

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod token_store;
