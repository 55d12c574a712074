//! Topic naming for room-scoped delivery.
//!
//! Topics are pure names, not state: they exist as soon as a connection
//! joins them and vanish when the last member leaves. The two families are
//! the per-order topic `order_<orderId>` (one customer's browser tabs) and
//! the shared `adminRoom` topic (every admin dashboard). Both literals are
//! part of the wire contract: a client's join request and the dispatcher's
//! target must match byte for byte.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::order_id::OrderId;

/// Wire name of the shared admin topic.
pub const ADMIN_ROOM: &str = "adminRoom";

/// Prefix of per-order topic names.
pub const ORDER_TOPIC_PREFIX: &str = "order_";

/// A named address that zero or more connections subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Customer-scoped topic for a single order (`order_<orderId>`).
    Order(OrderId),
    /// Shared topic joined by every admin dashboard (`adminRoom`).
    Admin,
}

impl Topic {
    /// Returns the per-order topic for the given order.
    #[must_use]
    pub const fn order(id: OrderId) -> Self {
        Self::Order(id)
    }

    /// Returns the shared admin topic.
    #[must_use]
    pub const fn admin() -> Self {
        Self::Admin
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order(id) => write!(f, "{ORDER_TOPIC_PREFIX}{id}"),
            Self::Admin => f.write_str(ADMIN_ROOM),
        }
    }
}

/// Error returned when a room name matches neither topic family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room name: {0}")]
pub struct UnknownRoom(
    /// The offending room name.
    pub String,
);

impl FromStr for Topic {
    type Err = UnknownRoom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ADMIN_ROOM {
            return Ok(Self::Admin);
        }
        if let Some(suffix) = s.strip_prefix(ORDER_TOPIC_PREFIX)
            && let Ok(id) = suffix.parse::<OrderId>()
        {
            return Ok(Self::Order(id));
        }
        Err(UnknownRoom(s.to_string()))
    }
}

impl Serialize for Topic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
