//! Expense models and DTOs.
//!
//! Dates travel as `YYYY-MM-DD` strings and are validated before they reach
//! the service layer.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{CategoryId, ExpenseId, UserId};

pub const EXPENSE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    #[sqlx(rename = "expense_category_id")]
    pub category_id: CategoryId,
    pub amount: f64,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExpenseDto {
    #[serde(alias = "expense_category_id")]
    pub category_id: CategoryId,
    #[validate(range(exclusive_min = 0.0, message = "amount must be greater than zero"))]
    #[schema(example = 42.5)]
    pub amount: f64,
    #[validate(custom(function = "validate_expense_date"))]
    #[schema(example = "2024-01-15")]
    pub date: String,
    pub note: Option<String>,
}

/// Partial update. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExpenseDto {
    #[serde(alias = "expense_category_id")]
    pub category_id: Option<CategoryId>,
    #[validate(range(exclusive_min = 0.0, message = "amount must be greater than zero"))]
    pub amount: Option<f64>,
    #[validate(custom(function = "validate_expense_date"))]
    pub date: Option<String>,
    pub note: Option<String>,
}

/// Optional filters for listing expenses. Date bounds are inclusive.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpenseFilterParams {
    /// Only expenses in this category
    #[param(value_type = Option<i64>)]
    pub category_id: Option<CategoryId>,
    /// Earliest date, `YYYY-MM-DD`
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    /// Latest date, `YYYY-MM-DD`
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
}

pub fn parse_expense_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, EXPENSE_DATE_FORMAT).ok()
}

fn validate_expense_date(value: &str) -> Result<(), ValidationError> {
    match parse_expense_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date")
            .with_message(Cow::Borrowed("invalid date format; use YYYY-MM-DD"))),
    }
}
