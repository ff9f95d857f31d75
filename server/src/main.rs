mod api;
mod config;
mod store;
mod telemetry;

use anyhow::Context;
use config::ServerConfig;
use std::env;
use std::sync::Arc;
use store::JsonStore;

/// Application state shared across all handlers
pub type AppState = Arc<JsonStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    let config = ServerConfig::from_env()?;
    telemetry::init_telemetry(&config);

    let store = JsonStore::open(&config.data_dir)
        .await
        .with_context(|| format!("Failed to open storage in {}", config.data_dir.display()))?;

    let app = api::app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
