//! Delivery dispatcher: bridges bus events to topic-targeted pushes.
//!
//! [`run_dispatcher`] is a dedicated task owning the only server-side
//! [`broadcast::Receiver`] on the event bus. Being a single consumer with
//! sequential sends, it preserves publish order per topic: members present
//! for two publishes to the same topic see them in the published order.
//! Delivery is fire-and-forget per connection; a member that disconnected
//! between the membership lookup and the push is skipped.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::messages::ServerMessage;
use super::registry::ConnectionRegistry;
use crate::domain::OrderEvent;

/// Consumes events from the bus and fans them out until the bus closes.
pub async fn run_dispatcher(
    mut event_rx: broadcast::Receiver<OrderEvent>,
    registry: Arc<ConnectionRegistry>,
) {
    loop {
        match event_rx.recv().await {
            Ok(event) => dispatch(&event, &registry).await,
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "dispatcher lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::debug!("dispatcher stopped: event bus closed");
}

/// Pushes one event to every current member of its topic.
async fn dispatch(event: &OrderEvent, registry: &ConnectionRegistry) {
    let topic = event.topic();
    // Serialize once; every member gets the same frame.
    let frame = ServerMessage::from_event(event).to_json();

    let members = registry.connections_in(topic).await;
    let mut delivered = 0usize;
    for (id, tx) in &members {
        // A send fails only when the connection task already exited; skip
        // it and keep pushing to the remaining members.
        if tx.send(frame.clone()).is_ok() {
            delivered = delivered.saturating_add(1);
        } else {
            tracing::debug!(connection = %id, topic = %topic, "skipped closed connection");
        }
    }

    tracing::debug!(
        event = event.event_name(),
        topic = %topic,
        members = members.len(),
        delivered,
        "event dispatched"
    );
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventBus, OrderId, OrderStatus, Topic};
    use crate::ws::registry::ConnectionId;
    use tokio::sync::mpsc;

    async fn member(
        registry: &ConnectionRegistry,
        topic: Topic,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx).await;
        assert!(registry.join(id, topic).await);
        (id, rx)
    }

    fn start_dispatcher(bus: &EventBus, registry: &Arc<ConnectionRegistry>) {
        let rx = bus.subscribe();
        let registry = Arc::clone(registry);
        tokio::spawn(run_dispatcher(rx, registry));
    }

    async fn recv_frame(rx: &mut mpsc::UnboundedReceiver<String>) -> serde_json::Value {
        let frame = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv()).await;
        let Ok(Some(frame)) = frame else {
            panic!("expected a pushed frame");
        };
        serde_json::from_str(&frame).unwrap_or_default()
    }

    #[tokio::test]
    async fn placed_event_reaches_only_admin_room() {
        let registry = Arc::new(ConnectionRegistry::new());
        let bus = EventBus::new(16);
        start_dispatcher(&bus, &registry);

        let (_admin, mut admin_rx) = member(&registry, Topic::Admin).await;
        let (_watcher, mut watcher_rx) = member(&registry, Topic::Order(OrderId::new())).await;

        let order = crate::domain::OrderRecord::new(
            crate::domain::CustomerRef {
                id: crate::domain::CustomerId::new(),
                name: "Bob".to_string(),
            },
            std::collections::HashMap::new(),
            false,
        );
        bus.publish(OrderEvent::OrderPlaced { order });

        let frame = recv_frame(&mut admin_rx).await;
        assert_eq!(frame.get("event").and_then(|v| v.as_str()), Some("orderPlaced"));
        assert_eq!(
            frame.pointer("/payload/customerId/name").and_then(|v| v.as_str()),
            Some("Bob")
        );

        // The order-topic watcher must receive nothing.
        assert!(watcher_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_event_reaches_only_its_order_topic() {
        let registry = Arc::new(ConnectionRegistry::new());
        let bus = EventBus::new(16);
        start_dispatcher(&bus, &registry);

        let id = OrderId::new();
        let (_watcher, mut watcher_rx) = member(&registry, Topic::Order(id)).await;
        let (_other, mut other_rx) = member(&registry, Topic::Order(OrderId::new())).await;

        bus.publish(OrderEvent::OrderUpdated {
            id,
            status: OrderStatus::OutOfDelivery,
        });

        let frame = recv_frame(&mut watcher_rx).await;
        assert_eq!(
            frame.pointer("/payload/status").and_then(|v| v.as_str()),
            Some("out-of-delivery")
        );
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order_per_topic() {
        let registry = Arc::new(ConnectionRegistry::new());
        let bus = EventBus::new(16);
        start_dispatcher(&bus, &registry);

        let id = OrderId::new();
        let (_watcher, mut rx) = member(&registry, Topic::Order(id)).await;

        for status in OrderStatus::STAGES {
            bus.publish(OrderEvent::OrderUpdated { id, status });
        }

        for expected in OrderStatus::STAGES {
            let frame = recv_frame(&mut rx).await;
            assert_eq!(
                frame.pointer("/payload/status").and_then(|v| v.as_str()),
                Some(expected.as_str())
            );
        }
    }

    #[tokio::test]
    async fn closed_member_is_skipped_without_starving_others() {
        let registry = Arc::new(ConnectionRegistry::new());
        let bus = EventBus::new(16);
        start_dispatcher(&bus, &registry);

        let (_gone, gone_rx) = member(&registry, Topic::Admin).await;
        let (_alive, mut alive_rx) = member(&registry, Topic::Admin).await;

        // Simulate a disconnect between membership lookup and push: the
        // receiver side of the outbound channel is gone but the registry
        // entry is still present.
        drop(gone_rx);

        let order = crate::domain::OrderRecord::new(
            crate::domain::CustomerRef {
                id: crate::domain::CustomerId::new(),
                name: "Alice".to_string(),
            },
            std::collections::HashMap::new(),
            true,
        );
        bus.publish(OrderEvent::OrderPlaced { order });

        let frame = recv_frame(&mut alive_rx).await;
        assert_eq!(frame.get("event").and_then(|v| v.as_str()), Some("orderPlaced"));
    }

    #[tokio::test]
    async fn late_joiner_misses_earlier_events() {
        let registry = Arc::new(ConnectionRegistry::new());
        let bus = EventBus::new(16);
        start_dispatcher(&bus, &registry);

        let id = OrderId::new();
        let (_early, mut early_rx) = member(&registry, Topic::Order(id)).await;

        bus.publish(OrderEvent::OrderUpdated {
            id,
            status: OrderStatus::OrderAccepted,
        });
        let _ = recv_frame(&mut early_rx).await;

        // Joined after the publish: nothing buffered for it.
        let (_late, mut late_rx) = member(&registry, Topic::Order(id)).await;
        assert!(late_rx.try_recv().is_err());
    }
}
