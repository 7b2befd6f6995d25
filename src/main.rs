//! Ink Studio Server
//!
//! Booking, gallery and admin REST API for a tattoo and art studio.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ink_studio_server::{
    config::AppConfig,
    create_router,
    repository::{
        memory::{seed_demo_data, MemoryDocumentStore},
        postgres::PgDocumentStore,
        DocumentStore, Repository,
    },
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ink_studio_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Ink Studio Server v{}", env!("CARGO_PKG_VERSION"));

    // Pick the persistence backend once
    let store: Arc<dyn DocumentStore> = match config.database.url.as_deref() {
        Some(url) if !config.is_demo() => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("Database migrations completed");
            Arc::new(PgDocumentStore::new(pool))
        }
        _ => {
            tracing::warn!("No database configured, running in demo mode (data is lost on restart)");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let repository = Repository::new(store);
    if config.is_demo() {
        seed_demo_data(&repository)
            .await
            .context("Failed to seed demo data")?;
    }

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let services = Services::from_config(repository, &config);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().context("Invalid host address")?,
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
