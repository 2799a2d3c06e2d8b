use std::net::SocketAddr;
use std::sync::Arc;

use timeoff::client::StoreClient;
use timeoff::storage::FileStore;
use timeoff::{AppConfig, AppState, router};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = FileStore::new(config.data_path.clone(), config.year);
    let client = StoreClient::new(Arc::new(store), config.store.clone());
    if let Err(err) = client.reload().await {
        warn!("initial load failed, starting with an empty collection: {err}");
    }

    let state = AppState::new(config.year, client);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        "leave calendar for {} listening on http://{addr}",
        config.year
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
