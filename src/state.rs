use sqlx::PgPool;

use spendwise_config::{CorsConfig, JwtConfig};
use spendwise_db::init_db_pool;

/// Shared state handed to every handler. Cloning is cheap: the pool is
/// reference-counted and the configs are immutable after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
