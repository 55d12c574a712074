//! WebSocket wire messages: join requests and pushed events.
//!
//! The server → client envelope is `{"event": "<name>", "payload": {...}}`
//! with the event names `orderPlaced` and `orderUpdated` fixed by the wire
//! contract. The client → server surface is the single `join` request.

use serde::{Deserialize, Serialize};

use crate::domain::{OrderEvent, Topic};

/// Messages a client can send over the socket.
///
/// Joining is client-initiated: a connection that never sends a join
/// request receives no events, whatever its credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Request membership in the named room.
    Join {
        /// Wire name of the topic (`order_<orderId>` or `adminRoom`).
        room: String,
    },
}

/// Server → client envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Event name (`orderPlaced`, `orderUpdated`, `joined`, `error`).
    pub event: String,
    /// Event-specific payload.
    pub payload: serde_json::Value,
}

impl ServerMessage {
    /// Builds the push frame for a domain event.
    #[must_use]
    pub fn from_event(event: &OrderEvent) -> Self {
        Self {
            event: event.event_name().to_string(),
            payload: event.payload(),
        }
    }

    /// Builds the acknowledgement sent after an admitted join.
    #[must_use]
    pub fn joined(topic: Topic) -> Self {
        Self {
            event: "joined".to_string(),
            payload: serde_json::json!({ "room": topic }),
        }
    }

    /// Builds an error frame with a gateway error code.
    #[must_use]
    pub fn error(code: u32, message: &str) -> Self {
        Self {
            event: "error".to_string(),
            payload: serde_json::json!({ "code": code, "message": message }),
        }
    }

    /// Serializes the frame to its wire JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{OrderId, OrderStatus};

    #[test]
    fn join_request_parses() {
        let msg: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"join","room":"adminRoom"}"#);
        let Ok(ClientMessage::Join { room }) = msg else {
            panic!("expected a join message");
        };
        assert_eq!(room, "adminRoom");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let msg: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"leave","room":"adminRoom"}"#);
        assert!(msg.is_err());
    }

    #[test]
    fn update_frame_matches_wire_contract() {
        let id = OrderId::new();
        let frame = ServerMessage::from_event(&OrderEvent::OrderUpdated {
            id,
            status: OrderStatus::OutOfDelivery,
        });
        let json: serde_json::Value =
            serde_json::from_str(&frame.to_json()).unwrap_or_default();
        assert_eq!(
            json.get("event").and_then(|v| v.as_str()),
            Some("orderUpdated")
        );
        assert_eq!(
            json.pointer("/payload/status").and_then(|v| v.as_str()),
            Some("out-of-delivery")
        );
        assert_eq!(
            json.pointer("/payload/id").and_then(|v| v.as_str()),
            Some(id.to_string().as_str())
        );
    }

    #[test]
    fn joined_ack_names_the_room() {
        let frame = ServerMessage::joined(Topic::Admin);
        let json: serde_json::Value =
            serde_json::from_str(&frame.to_json()).unwrap_or_default();
        assert_eq!(
            json.pointer("/payload/room").and_then(|v| v.as_str()),
            Some("adminRoom")
        );
    }
}
