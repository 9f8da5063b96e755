use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{app, start_refresh_worker, AppState};
use wayfare_store::{app_config::Config, MemoryStore, SnapshotLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,wayfare_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Wayfare analytics API on port {}", config.server.port);

    let mut store = match &config.data.seed_path {
        Some(path) => MemoryStore::from_seed_file(path)
            .await
            .with_context(|| format!("Failed to seed document store from {}", path))?,
        None => {
            tracing::warn!("No data.seed_path configured, starting with an empty document store");
            MemoryStore::new()
        }
    };
    if config.data.strict_collections {
        store = store.strict();
    }

    let loader = SnapshotLoader::new(Arc::new(store), config.collection_layout()?);
    let app_state = AppState::new(loader, config.analytics_settings()?);

    start_refresh_worker(
        app_state.dashboards.clone(),
        Duration::from_secs(config.data.refresh_interval_seconds),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
