//! # Spendwise Config
//!
//! Configuration types for the Spendwise API, loaded from environment
//! variables:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use spendwise_config::{CorsConfig, JwtConfig};
//!
//! // Panics if JWT_SECRET is missing
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::{ConfigError, JwtConfig};
