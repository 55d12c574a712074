//! Domain layer: order identity, lifecycle, topics, and the event system.
//!
//! This module contains the server-side domain model: order records and
//! their lifecycle stages, the topic naming rules for room-scoped delivery,
//! and the event bus that decouples order mutations from push delivery.

pub mod customer;
pub mod event_bus;
pub mod order;
pub mod order_event;
pub mod order_id;
pub mod status;
pub mod topic;

pub use customer::{CustomerId, CustomerRef};
pub use event_bus::EventBus;
pub use order::{OrderLine, OrderRecord};
pub use order_event::OrderEvent;
pub use order_id::OrderId;
pub use status::OrderStatus;
pub use topic::Topic;
