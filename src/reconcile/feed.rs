//! Live order list for the admin dashboard.
//!
//! Applies pushed events to a locally held, ordered list without a full
//! reload. Application is idempotent: replaying a frame the view has
//! already absorbed leaves the list unchanged.

use crate::domain::{OrderId, OrderRecord, OrderStatus};

/// Locally rendered order list, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderFeed {
    orders: Vec<OrderRecord>,
}

impl OrderFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the feed from an initial fetch (already newest first).
    #[must_use]
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }

    /// Applies an `orderPlaced` push: prepends the new order.
    ///
    /// If a record with the same ID is already present (a replayed frame),
    /// it is replaced in place rather than duplicated.
    pub fn apply_placed(&mut self, order: OrderRecord) {
        if let Some(existing) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *existing = order;
        } else {
            self.orders.insert(0, order);
        }
    }

    /// Applies an `orderUpdated` push to the matching row, if present.
    pub fn apply_update(&mut self, id: OrderId, status: OrderStatus) {
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
    }

    /// Returns the rendered list, newest first.
    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns `true` if the feed has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
