//! Lectern Server - Library Catalog
//!
//! A small Rust web server for a library catalog: book administration,
//! member lending, and session-authenticated dashboard pages.

use std::net::SocketAddr;
use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_server::{
    config::AppConfig, db, repository::Repository, routes::create_router, services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lectern_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Lectern Server v{}", env!("CARGO_PKG_VERSION"));

    // The session key derivation needs real entropy behind it
    if config.session.secret.len() < 32 {
        anyhow::bail!("session.secret must be at least 32 bytes");
    }
    let session_key = Key::derive_from(config.session.secret.as_bytes());

    // Create database connection pool and run migrations
    let pool = db::connect(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database, migrations applied");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool.clone());
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        pool,
        session_key,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
