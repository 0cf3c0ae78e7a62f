use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use spendwise_core::AppError;
use spendwise_models::{CategoryId, UserId};

use super::model::{Category, CreateCategoryDto, UpdateCategoryDto};

const COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

fn category_not_found() -> AppError {
    AppError::not_found(anyhow!("Category not found"))
}

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn create_category(
        db: &PgPool,
        user_id: UserId,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"INSERT INTO expense_categories (user_id, name, description)
               VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        Ok(category)
    }

    /// Lists the owner's categories, newest first.
    #[instrument(skip(db))]
    pub async fn get_categories(db: &PgPool, user_id: UserId) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM expense_categories WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(categories)
    }

    #[instrument(skip(db))]
    pub async fn get_category(
        db: &PgPool,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM expense_categories WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(category_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_category(
        db: &PgPool,
        user_id: UserId,
        id: CategoryId,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let existing = Self::get_category(db, user_id, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let description = dto.description.or(existing.description);

        sqlx::query_as::<_, Category>(&format!(
            r#"UPDATE expense_categories
               SET name = $1, description = $2, updated_at = NOW()
               WHERE id = $3 AND user_id = $4
               RETURNING {COLUMNS}"#
        ))
        .bind(&name)
        .bind(&description)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(category_not_found)
    }

    /// Deletes a category. Refused while expenses still reference it.
    #[instrument(skip(db))]
    pub async fn delete_category(
        db: &PgPool,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expense_categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::bad_request(anyhow!(
                        "Category still has expenses; delete them first"
                    ));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(category_not_found());
        }

        Ok(())
    }
}
