//! Service layer: business logic coordination between store and event bus.

pub mod order_service;

pub use order_service::OrderService;
