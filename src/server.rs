//! Application assembly: state construction and router wiring.
//!
//! Everything is built from explicit parts instead of ambient globals, so
//! a test can stand up a fresh gateway (bus, registry, store, router) in a
//! few lines and tear it down by dropping it.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::domain::EventBus;
use crate::service::OrderService;
use crate::store::OrderStore;
use crate::ws::dispatcher::run_dispatcher;
use crate::ws::handler::ws_handler;
use crate::ws::registry::ConnectionRegistry;

/// Builds a complete [`AppState`] with a fresh store, bus, and registry.
#[must_use]
pub fn build_state(event_bus_capacity: usize) -> AppState {
    let store = Arc::new(OrderStore::new());
    let event_bus = EventBus::new(event_bus_capacity);
    let registry = Arc::new(ConnectionRegistry::new());
    let order_service = Arc::new(OrderService::new(store, event_bus.clone()));

    AppState {
        order_service,
        event_bus,
        registry,
    }
}

/// Spawns the delivery dispatcher task for the given state.
///
/// The dispatcher owns the server side's only bus subscription; it runs
/// until the bus (held by the state) is dropped.
pub fn spawn_dispatcher(state: &AppState) -> tokio::task::JoinHandle<()> {
    let event_rx = state.event_bus.subscribe();
    let registry = Arc::clone(&state.registry);
    tokio::spawn(run_dispatcher(event_rx, registry))
}

/// Builds the full router (REST + WebSocket) over the given state.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
