//! Order records as exchanged with the external document store.
//!
//! Field names serialize exactly as the storefront's wire contract expects
//! (`_id`, `customerId`, `createdAt`...); the full serialized record is the
//! `orderPlaced` payload pushed to admin dashboards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer::CustomerRef;
use super::order_id::OrderId;
use super::status::OrderStatus;

/// One cart line inside an order: the product snapshot plus a quantity.
///
/// The product snapshot is carried as opaque JSON because the catalog
/// schema belongs to the storefront, not to this gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product snapshot as captured at checkout time.
    pub item: serde_json::Value,
    /// Quantity ordered.
    pub qty: u32,
}

/// A placed order with its denormalized customer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order identifier.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// The customer that placed the order, denormalized for display.
    pub customer_id: CustomerRef,
    /// Cart lines keyed by product id.
    pub items: HashMap<String, OrderLine>,
    /// Whether gift wrapping was requested.
    pub addgift: bool,
    /// Payment method label.
    pub payment: String,
    /// Current lifecycle stage.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Builds a freshly placed order in the initial lifecycle stage.
    #[must_use]
    pub fn new(customer: CustomerRef, items: HashMap<String, OrderLine>, addgift: bool) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            customer_id: customer,
            items,
            addgift,
            payment: "Cash-on-delivery".to_string(),
            status: OrderStatus::OrderPlaced,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::customer::CustomerId;

    fn make_order() -> OrderRecord {
        let mut items = HashMap::new();
        items.insert(
            "p1".to_string(),
            OrderLine {
                item: serde_json::json!({"title": "Margherita", "price": 12}),
                qty: 2,
            },
        );
        OrderRecord::new(
            CustomerRef {
                id: CustomerId::new(),
                name: "Bob".to_string(),
            },
            items,
            false,
        )
    }

    #[test]
    fn new_order_starts_placed() {
        let order = make_order();
        assert_eq!(order.status, OrderStatus::OrderPlaced);
        assert_eq!(order.payment, "Cash-on-delivery");
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn serializes_with_contract_field_names() {
        let order = make_order();
        let json = serde_json::to_value(&order).unwrap_or_default();
        assert!(json.get("_id").is_some());
        assert!(json.get("customerId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(
            json.get("status").and_then(|v| v.as_str()),
            Some("order-placed")
        );
        let qty = json
            .pointer("/items/p1/qty")
            .and_then(serde_json::Value::as_u64);
        assert_eq!(qty, Some(2));
    }
}
