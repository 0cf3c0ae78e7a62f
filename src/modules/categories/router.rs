use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_category, delete_category, get_categories, get_category, update_category,
};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
