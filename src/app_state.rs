//! Shared application state injected into all Axum handlers.
//!
//! Built explicitly at startup (and per test) rather than living in a
//! process-wide global, so every test can run against a fresh bus and
//! registry.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::OrderService;
use crate::ws::registry::ConnectionRegistry;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Order service for all order mutations and reads.
    pub order_service: Arc<OrderService>,
    /// Event bus connecting mutations to the delivery dispatcher.
    pub event_bus: EventBus,
    /// Live connection/topic membership registry.
    pub registry: Arc<ConnectionRegistry>,
}
