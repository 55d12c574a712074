//! WebSocket connection state machine.
//!
//! Runs the read/write loop for a single socket: inbound frames carry join
//! requests, the outbound channel carries frames pushed by the dispatcher
//! (and this task's own acknowledgements, so there is exactly one writer
//! per socket). On any close or write failure the task deregisters the
//! connection, which atomically discards all of its topic memberships.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage};
use super::registry::{ConnectionId, ConnectionRegistry};
use crate::domain::{CustomerId, Topic};
use crate::error::GatewayError;
use crate::store::OrderStore;

/// Authenticated identity of a connecting client, as established by the
/// external auth layer before the upgrade.
#[derive(Debug, Clone, Default)]
pub struct ClientIdentity {
    /// The customer this socket belongs to, if any.
    pub customer: Option<CustomerId>,
    /// Whether the client holds the admin role.
    pub admin: bool,
}

/// Runs the read/write loop for one WebSocket connection.
pub async fn run_connection(
    socket: WebSocket,
    identity: ClientIdentity,
    registry: Arc<ConnectionRegistry>,
    store: Arc<OrderStore>,
) {
    let id = ConnectionId::new();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    registry.register(id, out_tx.clone()).await;
    tracing::debug!(connection = %id, admin = identity.admin, "ws connection opened");

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Frame pushed by the dispatcher (or our own ack)
            frame = out_rx.recv() => {
                match frame {
                    Some(json) => {
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, id, &identity, &registry, &store).await;
                        if let Some(reply) = reply {
                            let _ = out_tx.send(reply.to_json());
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    registry.disconnect(id).await;
    tracing::debug!(connection = %id, "ws connection closed");
}

/// Handles one inbound text frame, returning the frame to send back.
async fn handle_text_message(
    text: &str,
    id: ConnectionId,
    identity: &ClientIdentity,
    registry: &ConnectionRegistry,
    store: &OrderStore,
) -> Option<ServerMessage> {
    let Ok(msg) = serde_json::from_str::<ClientMessage>(text) else {
        return Some(ServerMessage::error(1001, "malformed message"));
    };

    match msg {
        ClientMessage::Join { room } => {
            let topic = match room.parse::<Topic>() {
                Ok(topic) => topic,
                Err(err) => {
                    let err = GatewayError::from(err);
                    return Some(ServerMessage::error(err.error_code(), &err.to_string()));
                }
            };
            if let Err(err) = authorize_join(identity, topic, store).await {
                tracing::debug!(connection = %id, room = %topic, "join denied");
                return Some(ServerMessage::error(err.error_code(), &err.to_string()));
            }
            registry.join(id, topic).await;
            Some(ServerMessage::joined(topic))
        }
    }
}

/// Validates that the connection's identity is entitled to the topic.
///
/// `adminRoom` requires the admin role; an order topic requires being the
/// order's owner (or an admin). The server never grants membership purely
/// on the client's say-so.
async fn authorize_join(
    identity: &ClientIdentity,
    topic: Topic,
    store: &OrderStore,
) -> Result<(), GatewayError> {
    match topic {
        Topic::Admin => {
            if identity.admin {
                Ok(())
            } else {
                Err(GatewayError::Forbidden(
                    "admin role required for adminRoom".to_string(),
                ))
            }
        }
        Topic::Order(order_id) => {
            if identity.admin {
                return Ok(());
            }
            let order = store.get(order_id).await?;
            match identity.customer {
                Some(customer) if order.customer_id.id == customer => Ok(()),
                _ => Err(GatewayError::Forbidden(
                    "only the order's owner may watch it".to_string(),
                )),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRef, OrderId, OrderRecord};
    use std::collections::HashMap;

    async fn seeded_store() -> (Arc<OrderStore>, OrderId, CustomerId) {
        let store = Arc::new(OrderStore::new());
        let customer = CustomerId::new();
        let order = OrderRecord::new(
            CustomerRef {
                id: customer,
                name: "Bob".to_string(),
            },
            HashMap::new(),
            false,
        );
        let id = order.id;
        let _ = store.insert(order).await;
        (store, id, customer)
    }

    fn admin() -> ClientIdentity {
        ClientIdentity {
            customer: None,
            admin: true,
        }
    }

    fn customer_identity(customer: CustomerId) -> ClientIdentity {
        ClientIdentity {
            customer: Some(customer),
            admin: false,
        }
    }

    #[tokio::test]
    async fn admin_may_join_admin_room() {
        let (store, _, _) = seeded_store().await;
        assert!(authorize_join(&admin(), Topic::Admin, &store).await.is_ok());
    }

    #[tokio::test]
    async fn customer_may_not_join_admin_room() {
        let (store, _, customer) = seeded_store().await;
        let result = authorize_join(&customer_identity(customer), Topic::Admin, &store).await;
        assert!(matches!(result, Err(GatewayError::Forbidden(_))));
    }

    #[tokio::test]
    async fn owner_may_join_own_order_topic() {
        let (store, order_id, customer) = seeded_store().await;
        let result =
            authorize_join(&customer_identity(customer), Topic::Order(order_id), &store).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stranger_may_not_join_order_topic() {
        let (store, order_id, _) = seeded_store().await;
        let stranger = customer_identity(CustomerId::new());
        let result = authorize_join(&stranger, Topic::Order(order_id), &store).await;
        assert!(matches!(result, Err(GatewayError::Forbidden(_))));
    }

    #[tokio::test]
    async fn joining_unknown_order_reports_not_found() {
        let (store, _, customer) = seeded_store().await;
        let result = authorize_join(
            &customer_identity(customer),
            Topic::Order(OrderId::new()),
            &store,
        )
        .await;
        assert!(matches!(result, Err(GatewayError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn malformed_frame_yields_error_reply() {
        let (store, _, _) = seeded_store().await;
        let registry = ConnectionRegistry::new();
        let reply = handle_text_message(
            "not json",
            ConnectionId::new(),
            &admin(),
            &registry,
            &store,
        )
        .await;
        let Some(reply) = reply else {
            panic!("expected an error reply");
        };
        assert_eq!(reply.event, "error");
    }

    #[tokio::test]
    async fn admitted_join_registers_membership_and_acks() {
        let (store, order_id, _) = seeded_store().await;
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(id, tx).await;

        let frame = format!(r#"{{"type":"join","room":"order_{order_id}"}}"#);
        let reply = handle_text_message(&frame, id, &admin(), &registry, &store).await;
        let Some(reply) = reply else {
            panic!("expected a joined ack");
        };
        assert_eq!(reply.event, "joined");
        assert_eq!(registry.member_count(Topic::Order(order_id)).await, 1);
    }

    #[tokio::test]
    async fn denied_join_leaves_no_membership() {
        let (store, order_id, _) = seeded_store().await;
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(id, tx).await;

        let stranger = customer_identity(CustomerId::new());
        let frame = format!(r#"{{"type":"join","room":"order_{order_id}"}}"#);
        let reply = handle_text_message(&frame, id, &stranger, &registry, &store).await;
        let Some(reply) = reply else {
            panic!("expected an error reply");
        };
        assert_eq!(reply.event, "error");
        assert_eq!(registry.member_count(Topic::Order(order_id)).await, 0);
    }
}
