//! Local Library server
//!
//! Serves the catalog pages over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_library::{
    api,
    config::{AppConfig, LoggingConfig, StoreBackend, StoreConfig},
    store::{MemoryStore, PgStore, Store},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Local Library v{}", env!("CARGO_PKG_VERSION"));

    let store = connect_store(&config.store).await?;

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(store);
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("local_library={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config.backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect(&config.url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            let store = PgStore::new(pool);
            store
                .migrate()
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
