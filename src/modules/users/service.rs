use sqlx::PgPool;
use tracing::instrument;

use spendwise_core::{AppError, AuthError};
use spendwise_models::UserId;

use super::model::{User, UserWithPassword};

pub struct UserService;

impl UserService {
    /// Inserts a user with an already hashed password.
    ///
    /// A clash on username or email is reported as
    /// [`AuthError::DuplicateUser`].
    #[instrument(skip(db, password_hash))]
    pub async fn create_user(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, email, password)
               VALUES ($1, $2, $3)
               RETURNING id, username, email, created_at, updated_at"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::from(AuthError::DuplicateUser);
            }
            AppError::from(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Loads a user together with the stored digest. Login only.
    #[instrument(skip(db))]
    pub async fn find_by_email_with_password(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            r#"SELECT id, username, email, password, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
