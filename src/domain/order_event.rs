//! Domain events reflecting order state mutations.
//!
//! Every successful order mutation emits an [`OrderEvent`] through the
//! [`super::EventBus`]. Events are ephemeral: they are never stored, only
//! passed transiently from the mutating request handler to the delivery
//! dispatcher, which fans them out to the event's topic.

use serde::Serialize;

use super::order::OrderRecord;
use super::order_id::OrderId;
use super::status::OrderStatus;
use super::topic::Topic;

/// Domain event emitted after a successful order mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OrderEvent {
    /// A new order was placed. Carries the full denormalized record for
    /// the admin dashboard's order table.
    OrderPlaced {
        /// The freshly persisted order.
        order: OrderRecord,
    },
    /// An existing order's lifecycle stage changed.
    OrderUpdated {
        /// The affected order.
        id: OrderId,
        /// The new lifecycle stage.
        status: OrderStatus,
    },
}

impl OrderEvent {
    /// Returns the topic this event is addressed to.
    ///
    /// Placed orders go to every admin dashboard; status updates go only
    /// to the tabs watching that specific order.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::OrderPlaced { .. } => Topic::Admin,
            Self::OrderUpdated { id, .. } => Topic::Order(*id),
        }
    }

    /// Returns the wire event name.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::OrderPlaced { .. } => "orderPlaced",
            Self::OrderUpdated { .. } => "orderUpdated",
        }
    }

    /// Serializes the event payload per the wire contract: the full order
    /// record for `orderPlaced`, `{id, status}` for `orderUpdated`.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::OrderPlaced { order } => serde_json::to_value(order).unwrap_or_default(),
            Self::OrderUpdated { id, status } => serde_json::json!({
                "id": id,
                "status": status,
            }),
        }
    }
}
