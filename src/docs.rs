use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, TokenResponse,
};
use crate::modules::categories::model::{Category, CreateCategoryDto, UpdateCategoryDto};
use crate::modules::expenses::model::{CreateExpenseDto, Expense, UpdateExpenseDto};
use crate::modules::users::model::User;
use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_tokens,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_profile,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::expenses::controller::get_expenses,
        crate::modules::expenses::controller::create_expense,
        crate::modules::expenses::controller::get_expense,
        crate::modules::expenses::controller::update_expense,
        crate::modules::expenses::controller::delete_expense,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            Category,
            CreateCategoryDto,
            UpdateCategoryDto,
            Expense,
            CreateExpenseDto,
            UpdateExpenseDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration and session lifecycle"),
        (name = "Users", description = "The authenticated user"),
        (name = "Categories", description = "Expense categories owned by the caller"),
        (name = "Expenses", description = "Expenses owned by the caller")
    ),
    info(
        title = "Spendwise API",
        version = "0.1.0",
        description = "Personal expense tracking API built with Rust, Axum, and PostgreSQL, secured with short-lived access tokens and rotating refresh tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
