//! Refresh token persistence.
//!
//! A stored record is the only proof that a refresh token may be used.
//! Rotation rewrites the record in place with a compare-and-swap on the old
//! token value, so two requests presenting the same token cannot both win.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use spendwise_core::AuthError;
use spendwise_models::UserId;

use super::model::RefreshToken;

const RETURNING: &str = "RETURNING id, user_id, token, expires_at, created_at";

fn classify(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AuthError::UniquenessViolation;
    }
    AuthError::StoreFailure(e.to_string())
}

pub struct RefreshTokenStore;

impl RefreshTokenStore {
    #[instrument(skip(db, token))]
    pub async fn save(
        db: &PgPool,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        sqlx::query_as::<_, RefreshToken>(&format!(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES ($1, $2, $3) {RETURNING}"
        ))
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(db)
        .await
        .map_err(classify)
    }

    #[instrument(skip(db, token))]
    pub async fn find_by_token(db: &PgPool, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT id, user_id, token, expires_at, created_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(db)
        .await
        .map_err(classify)
    }

    /// Replaces the token value and expiry of `record`.
    ///
    /// Returns `None` when the stored token no longer equals `record.token`,
    /// i.e. another rotation or a logout got there first.
    #[instrument(skip(db, record, new_token), fields(record_id = %record.id))]
    pub async fn rotate(
        db: &PgPool,
        record: &RefreshToken,
        new_token: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, AuthError> {
        sqlx::query_as::<_, RefreshToken>(&format!(
            r#"UPDATE refresh_tokens
               SET token = $1, expires_at = $2
               WHERE id = $3 AND token = $4
               {RETURNING}"#
        ))
        .bind(new_token)
        .bind(new_expires_at)
        .bind(record.id)
        .bind(&record.token)
        .fetch_optional(db)
        .await
        .map_err(classify)
    }

    /// Deletes the record holding `token`. Deleting an unknown token is not
    /// an error.
    #[instrument(skip(db, token))]
    pub async fn delete_by_token(db: &PgPool, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(db)
            .await
            .map_err(classify)?;

        Ok(())
    }

    /// Deletes every record that expired before `now`. Returns the count.
    #[instrument(skip(db))]
    pub async fn delete_expired(db: &PgPool, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(db)
            .await
            .map_err(classify)?;

        Ok(result.rows_affected())
    }
}
