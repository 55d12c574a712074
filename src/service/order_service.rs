//! Order service: orchestrates order mutations and emits events.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    CustomerId, CustomerRef, EventBus, OrderEvent, OrderId, OrderLine, OrderRecord, OrderStatus,
};
use crate::error::GatewayError;
use crate::store::OrderStore;

/// Orchestration layer for all order operations.
///
/// Stateless coordinator: owns references to the [`OrderStore`] for state
/// and the [`EventBus`] for event emission. Every mutation follows the
/// pattern: persist → publish → return. Publication happens only after the
/// persistence step succeeds, and a publish with no receivers is dropped
/// without affecting the caller's outcome.
#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<OrderStore>,
    event_bus: EventBus,
}

impl OrderService {
    /// Creates a new `OrderService`.
    #[must_use]
    pub fn new(store: Arc<OrderStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`OrderStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<OrderStore> {
        &self.store
    }

    /// Places a new order for the given customer.
    ///
    /// Persists the record, then broadcasts `orderPlaced` with the full
    /// denormalized record to the admin room.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if persistence fails; in that case no
    /// event is published.
    pub async fn place_order(
        &self,
        customer: CustomerRef,
        items: HashMap<String, OrderLine>,
        addgift: bool,
    ) -> Result<OrderRecord, GatewayError> {
        if items.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "cannot place an order with an empty cart".to_string(),
            ));
        }

        let record = OrderRecord::new(customer, items, addgift);
        self.store.insert(record.clone()).await?;

        let _ = self.event_bus.publish(OrderEvent::OrderPlaced {
            order: record.clone(),
        });

        tracing::info!(order_id = %record.id, customer = %record.customer_id.id, "order placed");
        Ok(record)
    }

    /// Moves an order to a new lifecycle stage.
    ///
    /// Persists the change, then publishes `orderUpdated {id, status}` to
    /// the order's topic.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::OrderNotFound`] for an unknown order; no
    /// event is published in that case.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderRecord, GatewayError> {
        let record = self.store.set_status(id, status).await?;

        let _ = self
            .event_bus
            .publish(OrderEvent::OrderUpdated { id, status });

        tracing::info!(order_id = %id, status = %status, "order status updated");
        Ok(record)
    }

    /// Returns a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::OrderNotFound`] if no such order exists.
    pub async fn get_order(&self, id: OrderId) -> Result<OrderRecord, GatewayError> {
        self.store.get(id).await
    }

    /// Returns the given customer's orders, newest first.
    pub async fn orders_for_customer(&self, customer: CustomerId) -> Vec<OrderRecord> {
        self.store.list_for_customer(customer).await
    }

    /// Returns all not-yet-delivered orders, newest first.
    pub async fn open_orders(&self) -> Vec<OrderRecord> {
        self.store.list_open().await
    }
}
