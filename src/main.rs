//! washbay-admin server entry point.
//!
//! Loads configuration, connects the store, and starts the Axum HTTP
//! server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use washbay_admin::app_state::AppState;
use washbay_admin::config::{AdminConfig, LogFormat, StoreBackend};
use washbay_admin::domain::AdminRole;
use washbay_admin::persistence::{AdminStore, MemoryStore, PgStore, postgres};
use washbay_admin::server::build_app;
use washbay_admin::storage::{LocalObjectStorage, ObjectStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AdminConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, backend = ?config.store_backend, "starting washbay-admin");

    // Build persistence layer
    let store: Arc<dyn AdminStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = postgres::connect(&config)
                .await
                .context("connecting to PostgreSQL")?;
            if config.run_migrations {
                postgres::migrate(&pool).await.context("running migrations")?;
                tracing::info!("migrations applied");
            }
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let storage: Arc<dyn ObjectStorage> = Arc::new(LocalObjectStorage::new(
        &config.storage_root,
        &config.storage_bucket,
        &config.storage_public_base_url,
    ));

    // Build application state
    let app_state = AppState::new(&config, store, storage);

    if let Some(user) = config.bootstrap_superadmin {
        app_state
            .access
            .grant(user, AdminRole::Superadmin)
            .await
            .context("granting bootstrap superadmin")?;
    }

    // Build router
    let app = build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
