use axum::Json;
use tracing::instrument;

use spendwise_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;

use super::model::User;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_profile(AuthUser(user): AuthUser) -> Result<Json<User>, AppError> {
    Ok(Json(user))
}
