//! Application error types.
//!
//! Two layers are used:
//!
//! - [`AuthError`]: the closed set of authentication and session failures
//!   produced by the auth core (hashing, token issuance, the auth gate and
//!   the refresh-token store).
//! - [`AppError`]: the HTTP-facing error returned by every handler. It wraps
//!   any error as an [`anyhow::Error`] together with a status code.
//!
//! Converting into [`AppError`] with `?` inspects the wrapped error: an
//! [`AuthError`] keeps its own status, a [`validator::ValidationErrors`]
//! becomes `400 Bad Request`, anything else is `500 Internal Server Error`.
//!
//! Server errors never leak their cause to the client. The response body
//! carries a fixed message while the full error chain goes to the log.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failures of the authentication and session lifecycle.
#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Authorization header must be of the form 'Bearer <token>'")]
    MissingOrMalformedHeader,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Invalid token claims")]
    MalformedClaims,
    #[error("User not found")]
    UnknownUser,
    /// Returned both for an unknown email and for a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Refresh token expired")]
    ExpiredRefreshToken,
    #[error("Username or email already registered")]
    DuplicateUser,
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),
    #[error("Token signing failed: {0}")]
    SigningFailure(String),
    #[error("Random source unavailable: {0}")]
    EntropyFailure(String),
    #[error("Refresh token value already in use")]
    UniquenessViolation,
    #[error("Token store failure: {0}")]
    StoreFailure(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingOrMalformedHeader
            | AuthError::InvalidOrExpiredToken
            | AuthError::MalformedClaims
            | AuthError::UnknownUser
            | AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::ExpiredRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateUser => StatusCode::BAD_REQUEST,
            AuthError::HashingFailure(_)
            | AuthError::SigningFailure(_)
            | AuthError::EntropyFailure(_)
            | AuthError::UniquenessViolation
            | AuthError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-friendly label, used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingOrMalformedHeader => "missing_or_malformed_header",
            AuthError::InvalidOrExpiredToken => "invalid_or_expired_token",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::UnknownUser => "unknown_user",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidRefreshToken => "invalid_refresh_token",
            AuthError::ExpiredRefreshToken => "expired_refresh_token",
            AuthError::DuplicateUser => "duplicate_user",
            AuthError::HashingFailure(_) => "hashing_failure",
            AuthError::SigningFailure(_) => "signing_failure",
            AuthError::EntropyFailure(_) => "entropy_failure",
            AuthError::UniquenessViolation => "uniqueness_violation",
            AuthError::StoreFailure(_) => "store_failure",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    /// Returns the [`AuthError`] this error was built from, if any.
    pub fn auth_error(&self) -> Option<&AuthError> {
        self.error.downcast_ref::<AuthError>()
    }

    fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        } else {
            tracing::debug!(status = %self.status.as_u16(), error = %self.error, "Request rejected");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error: Error = err.into();
        let status = if let Some(auth) = error.downcast_ref::<AuthError>() {
            auth.status_code()
        } else if error.is::<validator::ValidationErrors>() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self { status, error }
    }
}
