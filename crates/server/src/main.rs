use std::sync::Arc;

use insightboard_server::{build_router, AppState, ServerConfig};
use insightboard_store::InsightStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let config = ServerConfig::from_env()?;
    let store = InsightStore::open(&config.db_path)?;
    let state = Arc::new(AppState::new(store));
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening" = %config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
