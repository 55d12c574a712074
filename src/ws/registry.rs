//! Connection registry: the live mapping from connections to topics.
//!
//! The registry is the one shared mutable structure in the delivery path.
//! All access goes through a [`tokio::sync::RwLock`], so a membership read
//! performed after a join completes can never observe stale state. Nothing
//! here is persisted: a disconnect discards every membership immediately.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tokio::sync::{RwLock, mpsc};

use crate::domain::Topic;

/// Opaque handle identifying one live socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a fresh connection ID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound channel to one connection; frames are pre-serialized JSON.
pub type OutboundSender = mpsc::UnboundedSender<String>;

#[derive(Debug, Default)]
struct RegistryInner {
    /// Outbound channel per registered connection.
    senders: HashMap<ConnectionId, OutboundSender>,
    /// Topic → current members.
    members: HashMap<Topic, HashSet<ConnectionId>>,
    /// Connection → joined topics (for O(membership) disconnect).
    topics: HashMap<ConnectionId, HashSet<Topic>>,
}

/// Tracks live connections and their topic memberships.
///
/// Topics have no lifecycle of their own: an entry appears when the first
/// member joins and is removed when the last member leaves.
///
/// # Invariant
///
/// A connection is joined to at most one order topic at a time, and may
/// independently also be joined to the admin topic. Joining a second order
/// topic replaces the first.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    inner: RwLock<RegistryInner>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection's outbound channel. Called once on accept.
    pub async fn register(&self, id: ConnectionId, sender: OutboundSender) {
        let mut inner = self.inner.write().await;
        inner.senders.insert(id, sender);
        inner.topics.entry(id).or_default();
    }

    /// Idempotently adds `topic` to the connection's membership set.
    ///
    /// Duplicate joins are no-ops. Joins from connections that were never
    /// registered (or already disconnected) are ignored. Returns `true` if
    /// the connection is a member of `topic` after the call.
    pub async fn join(&self, id: ConnectionId, topic: Topic) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.senders.contains_key(&id) {
            return false;
        }

        // A connection watches at most one order at a time.
        if matches!(topic, Topic::Order(_)) {
            let stale: Vec<Topic> = inner
                .topics
                .get(&id)
                .map(|joined| {
                    joined
                        .iter()
                        .filter(|t| matches!(t, Topic::Order(_)) && **t != topic)
                        .copied()
                        .collect()
                })
                .unwrap_or_default();
            for old in stale {
                Self::remove_membership(&mut inner, id, old);
            }
        }

        inner.members.entry(topic).or_default().insert(id);
        inner.topics.entry(id).or_default().insert(topic);
        true
    }

    /// Returns the connections currently joined to `topic`, with their
    /// outbound channels. The snapshot reflects every join and disconnect
    /// completed before the call.
    pub async fn connections_in(&self, topic: Topic) -> Vec<(ConnectionId, OutboundSender)> {
        let inner = self.inner.read().await;
        inner
            .members
            .get(&topic)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| {
                        inner.senders.get(id).map(|tx| (*id, tx.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes all memberships for the connection and drops its channel.
    ///
    /// Invoked by the connection task on socket close; there is no grace
    /// period and no explicit leave operation.
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut inner = self.inner.write().await;
        inner.senders.remove(&id);
        let joined = inner.topics.remove(&id).unwrap_or_default();
        for topic in joined {
            if let Some(set) = inner.members.get_mut(&topic) {
                set.remove(&id);
                if set.is_empty() {
                    inner.members.remove(&topic);
                }
            }
        }
    }

    /// Returns the number of connections currently joined to `topic`.
    pub async fn member_count(&self, topic: Topic) -> usize {
        let inner = self.inner.read().await;
        inner.members.get(&topic).map_or(0, HashSet::len)
    }

    /// Returns the number of registered connections.
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.senders.len()
    }

    fn remove_membership(inner: &mut RegistryInner, id: ConnectionId, topic: Topic) {
        if let Some(set) = inner.members.get_mut(&topic) {
            set.remove(&id);
            if set.is_empty() {
                inner.members.remove(&topic);
            }
        }
        if let Some(joined) = inner.topics.get_mut(&id) {
            joined.remove(&topic);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::OrderId;

    async fn connect(registry: &ConnectionRegistry) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn join_makes_connection_visible_in_topic() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = connect(&registry).await;

        assert!(registry.join(id, Topic::Admin).await);
        let members = registry.connections_in(Topic::Admin).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members.first().map(|(m, _)| *m), Some(id));
    }

    #[tokio::test]
    async fn duplicate_join_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = connect(&registry).await;
        let topic = Topic::Order(OrderId::new());

        assert!(registry.join(id, topic).await);
        assert!(registry.join(id, topic).await);
        assert_eq!(registry.member_count(topic).await, 1);
    }

    #[tokio::test]
    async fn disconnect_clears_all_memberships() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = connect(&registry).await;
        let order_topic = Topic::Order(OrderId::new());

        let _ = registry.join(id, Topic::Admin).await;
        let _ = registry.join(id, order_topic).await;

        registry.disconnect(id).await;
        assert!(registry.connections_in(Topic::Admin).await.is_empty());
        assert!(registry.connections_in(order_topic).await.is_empty());
        assert_eq!(registry.connection_count().await, 0);
    }

    #[tokio::test]
    async fn joining_a_second_order_topic_replaces_the_first() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = connect(&registry).await;
        let first = Topic::Order(OrderId::new());
        let second = Topic::Order(OrderId::new());

        let _ = registry.join(id, first).await;
        let _ = registry.join(id, second).await;

        assert_eq!(registry.member_count(first).await, 0);
        assert_eq!(registry.member_count(second).await, 1);
    }

    #[tokio::test]
    async fn admin_membership_survives_order_topic_switch() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = connect(&registry).await;

        let _ = registry.join(id, Topic::Admin).await;
        let _ = registry.join(id, Topic::Order(OrderId::new())).await;
        assert_eq!(registry.member_count(Topic::Admin).await, 1);
    }

    #[tokio::test]
    async fn join_without_register_is_ignored() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        assert!(!registry.join(id, Topic::Admin).await);
        assert_eq!(registry.member_count(Topic::Admin).await, 0);
    }

    #[tokio::test]
    async fn connections_in_excludes_other_topics() {
        let registry = ConnectionRegistry::new();
        let (admin, _rx1) = connect(&registry).await;
        let (customer, _rx2) = connect(&registry).await;
        let order_topic = Topic::Order(OrderId::new());

        let _ = registry.join(admin, Topic::Admin).await;
        let _ = registry.join(customer, order_topic).await;

        let members = registry.connections_in(order_topic).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members.first().map(|(m, _)| *m), Some(customer));
    }
}
