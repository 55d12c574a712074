//! WebSocket layer: connections, room membership, and event delivery.
//!
//! The WebSocket endpoint at `/ws` carries join requests upstream and
//! order events downstream. Membership lives in the [`registry`], and the
//! [`dispatcher`] task fans bus events out to each topic's members.

pub mod connection;
pub mod dispatcher;
pub mod handler;
pub mod messages;
pub mod registry;
