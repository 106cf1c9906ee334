use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crisis_api::{router, AppState};
use crisis_common::Config;
use crisis_engine::StaticCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("crisis=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::from_json_file(path)?,
        None => StaticCatalog::builtin()?,
    };
    info!(cities = catalog.len(), "City catalog ready");

    let app = router(Arc::new(AppState::new(catalog)));

    let addr = config.bind_addr();
    info!("Crisis simulator API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
