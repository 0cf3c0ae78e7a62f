use anyhow::anyhow;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use spendwise_core::AppError;
use spendwise_models::{CategoryId, ExpenseId, UserId};

use super::model::{
    CreateExpenseDto, Expense, ExpenseFilterParams, UpdateExpenseDto, parse_expense_date,
};

const COLUMNS: &str =
    "id, user_id, expense_category_id, amount, date, note, created_at, updated_at";

fn expense_not_found() -> AppError {
    AppError::not_found(anyhow!("Expense not found"))
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    parse_expense_date(value)
        .ok_or_else(|| AppError::bad_request(anyhow!("invalid date format; use YYYY-MM-DD")))
}

pub struct ExpenseService;

impl ExpenseService {
    /// Fails with `404` unless the category exists and belongs to `user_id`.
    async fn ensure_category_owned(
        db: &PgPool,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<(), AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM expense_categories WHERE id = $1 AND user_id = $2)",
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        if !owned {
            return Err(AppError::not_found(anyhow!("Category not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_expense(
        db: &PgPool,
        user_id: UserId,
        dto: CreateExpenseDto,
    ) -> Result<Expense, AppError> {
        let date = parse_date(&dto.date)?;
        Self::ensure_category_owned(db, user_id, dto.category_id).await?;

        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"INSERT INTO expenses (user_id, expense_category_id, amount, date, note)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        ))
        .bind(user_id)
        .bind(dto.category_id)
        .bind(dto.amount)
        .bind(date)
        .bind(&dto.note)
        .fetch_one(db)
        .await?;

        Ok(expense)
    }

    /// Lists the owner's expenses, newest first, narrowed by any filters
    /// given.
    #[instrument(skip(db))]
    pub async fn get_expenses(
        db: &PgPool,
        user_id: UserId,
        filters: ExpenseFilterParams,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r#"SELECT {COLUMNS} FROM expenses
               WHERE user_id = $1
                 AND ($2::BIGINT IS NULL OR expense_category_id = $2)
                 AND ($3::DATE IS NULL OR date >= $3)
                 AND ($4::DATE IS NULL OR date <= $4)
               ORDER BY id DESC"#
        ))
        .bind(user_id)
        .bind(filters.category_id)
        .bind(filters.from)
        .bind(filters.to)
        .fetch_all(db)
        .await?;

        Ok(expenses)
    }

    #[instrument(skip(db))]
    pub async fn get_expense(
        db: &PgPool,
        user_id: UserId,
        id: ExpenseId,
    ) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {COLUMNS} FROM expenses WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(expense_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_expense(
        db: &PgPool,
        user_id: UserId,
        id: ExpenseId,
        dto: UpdateExpenseDto,
    ) -> Result<Expense, AppError> {
        let existing = Self::get_expense(db, user_id, id).await?;

        let date = match dto.date.as_deref() {
            Some(value) => parse_date(value)?,
            None => existing.date,
        };
        let category_id = match dto.category_id {
            Some(category_id) => {
                Self::ensure_category_owned(db, user_id, category_id).await?;
                category_id
            }
            None => existing.category_id,
        };
        let amount = dto.amount.unwrap_or(existing.amount);
        let note = dto.note.or(existing.note);

        sqlx::query_as::<_, Expense>(&format!(
            r#"UPDATE expenses
               SET expense_category_id = $1, amount = $2, date = $3, note = $4, updated_at = NOW()
               WHERE id = $5 AND user_id = $6
               RETURNING {COLUMNS}"#
        ))
        .bind(category_id)
        .bind(amount)
        .bind(date)
        .bind(&note)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(expense_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_expense(
        db: &PgPool,
        user_id: UserId,
        id: ExpenseId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(expense_not_found());
        }

        Ok(())
    }
}
