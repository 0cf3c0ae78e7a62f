use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument};

use spendwise_auth::verify_access_token;
use spendwise_core::{AppError, AuthError};
use spendwise_models::{User, UserId};

use crate::metrics::track_auth_rejection;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The authenticated caller, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present behind `require_auth`; a route missing the gate fails closed.
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::from(AuthError::MissingOrMalformedHeader))
    }
}

/// Returns the token from an `Authorization: Bearer <token>` header.
///
/// The scheme must be exactly `Bearer`, followed by one space and a
/// non-empty token that contains no further spaces.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingOrMalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingOrMalformedHeader),
    }
}

/// Resolves the caller from the request headers.
#[instrument(skip(state, headers))]
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = extract_bearer_token(headers)?;
    let claims = verify_access_token(token, &state.jwt_config)?;

    UserService::find_by_id(&state.db, UserId::new(claims.user_id))
        .await?
        .ok_or_else(|| AppError::from(AuthError::UnknownUser))
}

/// Auth gate for protected routes. Rejections short-circuit with `401`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await.inspect_err(|e| {
        if let Some(auth_error) = e.auth_error() {
            debug!(reason = auth_error.reason(), "Request rejected by auth gate");
            track_auth_rejection(auth_error.reason());
        }
    })?;

    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}
