//! basket-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints and the
//! delivery dispatcher task.

use tracing_subscriber::EnvFilter;

use basket_gateway::config::GatewayConfig;
use basket_gateway::server::{build_router, build_state, spawn_dispatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting basket-gateway");

    // Build application state and start the delivery dispatcher
    let state = build_state(config.event_bus_capacity);
    let _dispatcher = spawn_dispatcher(&state);

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
