use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use spendwise_core::AppError;
use spendwise_models::ExpenseId;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

use super::model::{CreateExpenseDto, Expense, ExpenseFilterParams, UpdateExpenseDto};
use super::service::ExpenseService;

#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseFilterParams),
    responses(
        (status = 200, description = "The caller's expenses, newest first", body = Vec<Expense>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn get_expenses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedQuery(filters): ValidatedQuery<ExpenseFilterParams>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = ExpenseService::get_expenses(&state.db, auth_user.id(), filters).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseDto,
    responses(
        (status = 201, description = "Expense created", body = Expense),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn create_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExpenseDto>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let expense = ExpenseService::create_expense(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense details", body = Expense),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn get_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ExpenseId>,
) -> Result<Json<Expense>, AppError> {
    let expense = ExpenseService::get_expense(&state.db, auth_user.id(), id).await?;
    Ok(Json(expense))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    request_body = UpdateExpenseDto,
    responses(
        (status = 200, description = "Expense updated", body = Expense),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense or category not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn update_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ExpenseId>,
    ValidatedJson(dto): ValidatedJson<UpdateExpenseDto>,
) -> Result<Json<Expense>, AppError> {
    let expense = ExpenseService::update_expense(&state.db, auth_user.id(), id, dto).await?;
    Ok(Json(expense))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn delete_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ExpenseId>,
) -> Result<Json<MessageResponse>, AppError> {
    ExpenseService::delete_expense(&state.db, auth_user.id(), id).await?;
    Ok(Json(MessageResponse::new("expense deleted successfully")))
}
