//! Products API - versioned REST server

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config);
    let app = api::app(&state)?;

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting Products API on port {}",
        state.config.server.port
    );

    let products = state.products.clone();
    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        async move {
            match products.count_products().await {
                Ok(count) => info!(count, "Discarding in-memory product store"),
                Err(e) => tracing::warn!(error = %e, "Product store unavailable during shutdown"),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
