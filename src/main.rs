//! HTTP server binary for the finance engine.

use std::sync::Arc;

use finance_engine::api::{AppState, create_router};
use finance_engine::config::ConfigLoader;
use finance_engine::store::InMemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load("./config/rates.yaml")?;
    let state = AppState::new(config, Arc::new(InMemoryStore::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
