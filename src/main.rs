use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use spendwise::logging::init_tracing;
use spendwise::metrics::{init_metrics, metrics_app};
use spendwise::modules::auth::service::AuthService;
use spendwise::router::init_router;
use spendwise::state::init_app_state;
use spendwise_db::{init_db_pool, run_migrations};

const DEFAULT_PORT: u16 = 8080;

#[derive(Parser)]
#[command(name = "spendwise")]
#[command(version, about = "Spendwise API server and maintenance commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on. Falls back to PORT, then 8080
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Delete refresh tokens that are past their expiry
    PruneTokens,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Migrate => {
            let pool = init_db_pool().await;
            run_migrations(&pool).await?;
            info!("Migrations applied");
            Ok(())
        }
        Commands::PruneTokens => {
            let pool = init_db_pool().await;
            let removed = AuthService::prune_expired_tokens(&pool)
                .await
                .map_err(|e| e.error)?;
            println!("Removed {removed} expired refresh token(s)");
            Ok(())
        }
    }
}

fn resolve_port(cli_port: Option<u16>) -> anyhow::Result<u16> {
    if let Some(port) = cli_port {
        return Ok(port);
    }
    match std::env::var("PORT") {
        Ok(value) => Ok(value.parse()?),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

async fn serve(cli_port: Option<u16>) -> anyhow::Result<()> {
    let port = resolve_port(cli_port)?;

    let state = init_app_state().await;
    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server running");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");
    info!("Scalar UI available at http://localhost:{port}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
