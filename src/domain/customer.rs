//! Customer identity types.
//!
//! The gateway never owns customer records; authentication and user storage
//! live outside this service. What crosses the boundary is a [`CustomerId`]
//! (for topic entitlement checks) and a denormalized [`CustomerRef`] that is
//! embedded in order payloads pushed to admin dashboards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a customer, as issued by the external user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(uuid::Uuid);

impl CustomerId {
    /// Creates a new random `CustomerId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `CustomerId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

/// Denormalized customer identity carried inside an order record.
///
/// The `orderPlaced` payload pushed to admin dashboards includes the customer
/// name so the console can render rows without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    /// The customer's identifier.
    #[serde(rename = "_id")]
    pub id: CustomerId,
    /// The customer's display name.
    pub name: String,
}
