use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jokes_backend::{
    auth::SessionStorage,
    build_router,
    config::{AppConfig, Cli, Command},
    db,
    memory::MemoryStore,
    repository::{PgStore, Store},
    seed, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jokes_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::Seed => {
            let database_url = cli
                .config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set to seed the database")?;
            let pool = db::establish_connection_pool(database_url, cli.config.database_tls)?;
            seed::run(&PgStore::new(pool)).await
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting jokes server");

    let store: Arc<dyn Store> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::establish_connection_pool(database_url, config.database_tls)?;
            tracing::info!("Database connection pool initialized");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping data in memory (lost on exit)");
            let store = MemoryStore::new();
            seed::run(&store).await?;
            Arc::new(store)
        }
    };

    let sessions = SessionStorage::new(config.session_secret.as_bytes(), config.session_config())
        .context("Invalid SESSION_SECRET")?;
    if !sessions.config().secure {
        tracing::warn!("Not running in production, session cookie is sent without Secure");
    }

    let app = build_router(AppState { store, sessions });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
