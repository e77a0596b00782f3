use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use funolympics::api;
use funolympics::config::Config;
use funolympics::store::{CsvFileSource, RecordSource, StoreHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Load the base dataset; without it there is nothing to serve
    let source: Arc<dyn RecordSource> = Arc::new(CsvFileSource::new(&config.data.path));
    info!("Loading dataset: {}", source.describe());
    let store = StoreHandle::load(source)
        .await
        .with_context(|| format!("failed to load base dataset {}", config.data.path))?;

    let snapshot = store.snapshot().await;
    let info = snapshot.store.info();
    info!(
        "Dataset ready: {} records ({} unreadable rows skipped)",
        info.record_count, info.skipped_rows
    );
    if let Some((start, end)) = snapshot.store.date_bounds() {
        info!("Date range {} to {}", start, end);
    }

    if config.cache.enabled {
        info!(
            "Dashboard cache enabled (max {} entries, ttl {}s)",
            config.cache.max_entries, config.cache.ttl_secs
        );
    } else {
        info!("Dashboard cache disabled");
    }

    let router = api::create_api_router(Arc::new(store), &config);

    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind {}", api_addr))?;
    info!("🚀 Dashboard API listening on http://{}", api_addr);
    info!("   - API endpoints available at http://{}/api/...", api_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
