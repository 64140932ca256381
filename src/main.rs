use std::sync::Arc;

use popcorn::{
    api::{create_router, AppState, SessionSettings},
    config::Config,
    services::{Catalog, HttpBackend, RecommendationBackend},
    storage::{create_redis_client, KeyValueStore, MemoryStore, RedisStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("popcorn=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);
    let backend: Arc<dyn RecommendationBackend> = Arc::new(HttpBackend::new(&config.backend_url));

    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => Arc::new(RedisStore::new(create_redis_client(redis_url)?)),
        None => {
            tracing::warn!("REDIS_URL not set, visitor storage will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(
        backend = %config.backend_url,
        store = store.name(),
        movies = catalog.len(),
        "Starting popcorn"
    );

    let state = AppState::new(catalog, backend, store, SessionSettings::from_config(&config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
