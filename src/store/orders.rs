//! In-memory order store.
//!
//! Stands in for the storefront's external document store, which this
//! gateway treats as a collaborator reachable through simple CRUD. State is
//! process-scoped: nothing survives a restart, mirroring the boundary the
//! notification core actually depends on (a record handed in, a mutation
//! acknowledged).

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{OrderId, OrderRecord, OrderStatus};
use crate::error::GatewayError;

/// Central store for all orders known to this process.
///
/// Uses a `RwLock<HashMap<...>>`: reads are concurrent, mutations are
/// serialized. List operations return snapshots sorted newest first, the
/// order both the customer history page and the admin console render in.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<OrderId, OrderRecord>>,
}

impl OrderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists a new order record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if an order with the same
    /// ID already exists (should never happen with UUID v4).
    pub async fn insert(&self, record: OrderRecord) -> Result<OrderId, GatewayError> {
        let id = record.id;
        let mut map = self.orders.write().await;
        if map.contains_key(&id) {
            return Err(GatewayError::InvalidRequest(format!(
                "order {id} already exists"
            )));
        }
        map.insert(id, record);
        Ok(id)
    }

    /// Returns a copy of the order with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::OrderNotFound`] if no such order exists.
    pub async fn get(&self, id: OrderId) -> Result<OrderRecord, GatewayError> {
        let map = self.orders.read().await;
        map.get(&id)
            .cloned()
            .ok_or(GatewayError::OrderNotFound(*id.as_uuid()))
    }

    /// Updates an order's lifecycle stage, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::OrderNotFound`] if no such order exists; in
    /// that case nothing is modified.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderRecord, GatewayError> {
        let mut map = self.orders.write().await;
        let record = map
            .get_mut(&id)
            .ok_or(GatewayError::OrderNotFound(*id.as_uuid()))?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    /// Returns all orders placed by the given customer, newest first.
    pub async fn list_for_customer(
        &self,
        customer: crate::domain::CustomerId,
    ) -> Vec<OrderRecord> {
        let map = self.orders.read().await;
        let mut orders: Vec<OrderRecord> = map
            .values()
            .filter(|o| o.customer_id.id == customer)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Returns all orders that have not yet been delivered, newest first.
    ///
    /// This is the admin console's working set.
    pub async fn list_open(&self) -> Vec<OrderRecord> {
        let map = self.orders.read().await;
        let mut orders: Vec<OrderRecord> = map
            .values()
            .filter(|o| !o.status.is_terminal())
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Returns the number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns `true` if the store holds no orders.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}
