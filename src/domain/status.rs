//! Order lifecycle status.
//!
//! An order moves through a fixed, ordered sequence of stages. The wire
//! strings (including the historical `comming-soon` spelling) are part of
//! the wire contract shared with browser clients and must not be changed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an order.
///
/// The variants are declared in lifecycle order; [`OrderStatus::STAGES`]
/// exposes that sequence for step-indicator rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received, not yet accepted by the store.
    #[serde(rename = "order-placed")]
    OrderPlaced,
    /// Order accepted and being prepared.
    #[serde(rename = "order-accepted")]
    OrderAccepted,
    /// Order handed to the courier.
    #[serde(rename = "out-of-delivery")]
    OutOfDelivery,
    /// Courier is close to the delivery address.
    #[serde(rename = "comming-soon")]
    ArrivingSoon,
    /// Order delivered; terminal stage.
    #[serde(rename = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// The full lifecycle in order, used by the status step indicator.
    pub const STAGES: [Self; 5] = [
        Self::OrderPlaced,
        Self::OrderAccepted,
        Self::OutOfDelivery,
        Self::ArrivingSoon,
        Self::Delivered,
    ];

    /// Returns the exact wire string for this stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "order-placed",
            Self::OrderAccepted => "order-accepted",
            Self::OutOfDelivery => "out-of-delivery",
            Self::ArrivingSoon => "comming-soon",
            Self::Delivered => "delivered",
        }
    }

    /// Returns this stage's index within [`Self::STAGES`].
    #[must_use]
    pub fn position(&self) -> usize {
        Self::STAGES.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Returns `true` for the terminal stage.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::OrderPlaced
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string does not name a known stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(
    /// The offending status string.
    pub String,
);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::STAGES
            .iter()
            .find(|stage| stage.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
