use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_expense, delete_expense, get_expense, get_expenses, update_expense};

pub fn init_expenses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_expenses).post(create_expense))
        .route(
            "/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}
