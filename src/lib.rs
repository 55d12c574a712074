//! # basket-gateway
//!
//! HTTP and WebSocket gateway for a storefront's real-time order-status
//! notifications. Order CRUD is deliberately thin; the heart of the crate
//! is the event distribution subsystem that fans order lifecycle events
//! out to the right subset of connected clients: a single customer's
//! browser tabs for status updates, every admin dashboard for new orders.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)           mutate orders
//!     ├── WS Handler (ws/)               join rooms, receive pushes
//!     │
//!     ├── OrderService (service/)        persist → publish
//!     ├── EventBus (domain/)             broadcast channel
//!     │
//!     ├── Dispatcher (ws/dispatcher)     event → topic → members
//!     ├── ConnectionRegistry (ws/)       topic membership
//!     │
//!     └── OrderStore (store/)            in-memory document store
//! ```
//!
//! The [`reconcile`] module is the client-side counterpart: idempotent
//! application of pushed events to locally rendered view state.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod reconcile;
pub mod server;
pub mod service;
pub mod store;
pub mod ws;
