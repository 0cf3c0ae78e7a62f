use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use spendwise_auth::issue_token_pair;
use spendwise_config::JwtConfig;
use spendwise_core::{
    AppError, AuthError, hash_password, verify_dummy_password, verify_password,
};
use spendwise_models::User;

use crate::metrics::{
    track_login_failure, track_login_success, track_logout, track_refresh, track_tokens_issued,
    track_user_registered,
};
use crate::modules::users::service::UserService;

use super::model::{LoginRequest, RegisterRequest, TokenResponse};
use super::token_store::RefreshTokenStore;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;
        let user = UserService::create_user(db, &dto.username, &dto.email, &password_hash).await?;

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Checks credentials and opens a new session.
    ///
    /// An unknown email and a wrong password fail identically, and both pay
    /// for one bcrypt verification.
    #[instrument(skip(db, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let Some(user) = UserService::find_by_email_with_password(db, &dto.email).await? else {
            verify_dummy_password(&dto.password);
            track_login_failure("unknown_email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login_failure("wrong_password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = issue_token_pair(user.id.get(), Utc::now(), jwt_config)?;
        RefreshTokenStore::save(db, user.id, &issued.refresh_token, issued.refresh_expires_at)
            .await?;

        track_login_success();
        track_tokens_issued();
        info!(user_id = %user.id, "User logged in");

        Ok(TokenResponse {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }

    /// Exchanges a live refresh token for a new pair, rotating the stored
    /// record in place.
    #[instrument(skip_all)]
    pub async fn refresh_tokens(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let Some(record) = RefreshTokenStore::find_by_token(db, refresh_token).await? else {
            track_refresh("unknown");
            return Err(AuthError::InvalidRefreshToken.into());
        };

        let now = Utc::now();
        if record.is_expired_at(now) {
            track_refresh("expired");
            return Err(AuthError::ExpiredRefreshToken.into());
        }

        let issued = issue_token_pair(record.user_id.get(), now, jwt_config)?;
        let rotated = RefreshTokenStore::rotate(
            db,
            &record,
            &issued.refresh_token,
            issued.refresh_expires_at,
        )
        .await?;

        if rotated.is_none() {
            warn!(record_id = %record.id, "Refresh token rotated concurrently");
            track_refresh("lost_race");
            return Err(AuthError::InvalidRefreshToken.into());
        }

        track_refresh("rotated");
        track_tokens_issued();

        Ok(TokenResponse {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }

    #[instrument(skip_all)]
    pub async fn logout(db: &PgPool, refresh_token: &str) -> Result<(), AppError> {
        RefreshTokenStore::delete_by_token(db, refresh_token).await?;
        track_logout();
        Ok(())
    }

    /// Removes refresh records past their expiry.
    #[instrument(skip(db))]
    pub async fn prune_expired_tokens(db: &PgPool) -> Result<u64, AppError> {
        let removed = RefreshTokenStore::delete_expired(db, Utc::now()).await?;
        info!(removed, "Pruned expired refresh tokens");
        Ok(removed)
    }
}
