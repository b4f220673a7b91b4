//! # HiveDesk API Server
//!
//! The HR onboarding API server: user accounts with HR/employee roles, task
//! assignment and completion, document upload and verification, training
//! progress, and performance reporting.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/hivedesk \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p hivedesk-api
//! ```

use hivedesk_api::{
    app::{build_router, AppState},
    config::Config,
    seed,
    storage::DocumentStorage,
};
use hivedesk_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hivedesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "HiveDesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let storage = DocumentStorage::new(&config.storage.upload_dir);
    storage.ensure_root().await?;

    seed::create_default_users(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config, storage);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
