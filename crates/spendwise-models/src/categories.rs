//! Expense category models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CategoryId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    #[schema(example = "Groceries")]
    pub name: String,
    pub description: Option<String>,
}

/// Partial update. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_requires_name() {
        let dto: CreateCategoryDto = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateCategoryDto =
            serde_json::from_str(r#"{"name":"Food","description":"eating out"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.description.as_deref(), Some("eating out"));
    }

    #[test]
    fn test_update_category_allows_empty_body() {
        let dto: UpdateCategoryDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.name.is_none());
    }
}
