//! # Spendwise Models
//!
//! Domain models and DTOs for the Spendwise API: database entities,
//! request/response bodies, and their validation rules.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed `i64` IDs
//! - [`users`]: user entity
//! - [`auth`]: register/login/refresh request and response bodies
//! - [`refresh_tokens`]: stored refresh token records
//! - [`categories`]: expense categories
//! - [`expenses`]: expenses and list filters

pub mod auth;
pub mod categories;
pub mod expenses;
pub mod ids;
pub mod refresh_tokens;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, TokenResponse,
};
pub use categories::{Category, CreateCategoryDto, UpdateCategoryDto};
pub use expenses::{CreateExpenseDto, Expense, ExpenseFilterParams, UpdateExpenseDto};
pub use ids::{CategoryId, ExpenseId, RefreshTokenId, UserId};
pub use refresh_tokens::RefreshToken;
pub use users::{User, UserWithPassword};
