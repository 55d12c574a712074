//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::connection::{ClientIdentity, run_connection};
use crate::app_state::AppState;
use crate::domain::CustomerId;

/// Identity query parameters attached to the upgrade request by the
/// external auth layer.
#[derive(Debug, Clone, Deserialize)]
pub struct WsAuthParams {
    /// Authenticated customer ID, if the client is a customer.
    pub customer_id: Option<uuid::Uuid>,
    /// Authenticated role; `"admin"` unlocks the admin room.
    pub role: Option<String>,
}

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsAuthParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let identity = ClientIdentity {
        customer: params.customer_id.map(CustomerId::from_uuid),
        admin: params.role.as_deref() == Some("admin"),
    };
    let registry = Arc::clone(&state.registry);
    let store = Arc::clone(state.order_service.store());

    ws.on_upgrade(move |socket| run_connection(socket, identity, registry, store))
}
