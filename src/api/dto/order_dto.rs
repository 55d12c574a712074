//! Order-related DTOs for the place, list, get, and status endpoints.
//!
//! Response field names mirror the storefront wire contract (`_id`,
//! `customerId`, `createdAt`...), so a REST fetch and a pushed
//! `orderPlaced` frame describe an order identically.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CustomerRef, OrderLine, OrderRecord};

/// One cart line in a place-order request or order response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineDto {
    /// Product snapshot as captured at checkout time.
    #[schema(value_type = Object)]
    pub item: serde_json::Value,
    /// Quantity ordered.
    pub qty: u32,
}

impl From<OrderLine> for OrderLineDto {
    fn from(line: OrderLine) -> Self {
        Self {
            item: line.item,
            qty: line.qty,
        }
    }
}

impl From<OrderLineDto> for OrderLine {
    fn from(dto: OrderLineDto) -> Self {
        Self {
            item: dto.item,
            qty: dto.qty,
        }
    }
}

/// Request body for `POST /orders`.
///
/// The customer identity and cart content arrive from the out-of-scope
/// session/cart layer; this endpoint is the boundary where they are handed
/// to the notification core.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// Authenticated customer ID.
    pub customer_id: uuid::Uuid,
    /// Customer display name, denormalized into the order record.
    pub customer_name: String,
    /// Cart lines keyed by product ID. Must not be empty.
    pub items: HashMap<String, OrderLineDto>,
    /// Whether gift wrapping was requested.
    #[serde(default)]
    pub addgift: bool,
}

/// Request body for `POST /admin/orders/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target lifecycle stage wire string (e.g. `"out-of-delivery"`).
    pub status: String,
}

/// Denormalized customer identity inside an order response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerRefDto {
    /// Customer identifier.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// Customer display name.
    pub name: String,
}

impl From<CustomerRef> for CustomerRefDto {
    fn from(customer: CustomerRef) -> Self {
        Self {
            id: *customer.id.as_uuid(),
            name: customer.name,
        }
    }
}

/// Full order representation returned by every order endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    /// Order identifier.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// The customer that placed the order.
    pub customer_id: CustomerRefDto,
    /// Cart lines keyed by product ID.
    pub items: HashMap<String, OrderLineDto>,
    /// Whether gift wrapping was requested.
    pub addgift: bool,
    /// Payment method label.
    pub payment: String,
    /// Current lifecycle stage wire string.
    pub status: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRecord> for OrderDto {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            customer_id: record.customer_id.into(),
            items: record
                .items
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
            addgift: record.addgift,
            payment: record.payment,
            status: record.status.as_str().to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// List response wrapper for order collections.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    /// Orders, newest first.
    pub data: Vec<OrderDto>,
    /// Number of orders returned.
    pub total: usize,
}
