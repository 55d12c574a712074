//! Broadcast channel for domain events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every order
//! mutation publishes an [`OrderEvent`] through the bus; the delivery
//! dispatcher is the bus's consuming task in the running server. Publication
//! is decoupled from delivery: a publish never fails the request handler
//! that triggered it, and an event with no live receivers is dropped.

use tokio::sync::broadcast;

use super::OrderEvent;

/// Broadcast bus for [`OrderEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers. Events enter the buffer in publish order, which is what gives
/// the per-topic delivery ordering downstream.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<OrderEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped;
    /// delivery is best-effort and never affects the publisher.
    pub fn publish(&self, event: OrderEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    ///
    /// The delivery dispatcher calls this once at startup.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
