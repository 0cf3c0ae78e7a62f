use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_user, logout_user, refresh_tokens, register_user};

/// Public session routes, mounted at the root.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_tokens))
}

/// Session routes that sit behind the auth gate.
pub fn init_protected_auth_router() -> Router<AppState> {
    Router::new().route("/logout", post(logout_user))
}
