//! Request middleware and extractors.
//!
//! - [`auth`]: the auth gate ([`auth::require_auth`]) and the [`auth::AuthUser`]
//!   extractor it feeds
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the access token and loads the user
//! 3. The user is stored in the request extensions as `AuthUser`
//! 4. Handlers take `AuthUser` as an argument
//!
//! ```ignore
//! async fn list_categories(
//!     State(state): State<AppState>,
//!     AuthUser(user): AuthUser,
//! ) -> Result<Json<Vec<Category>>, AppError> {
//!     // user.id scopes every query
//! }
//! ```

pub mod auth;
