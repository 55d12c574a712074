//! Client-side reconciliation: applying pushed events to local view state.
//!
//! These types are the Rust counterpart of the browser logic that consumes
//! pushed frames: the admin dashboard's live order table ([`OrderFeed`])
//! and the single-order status stepper ([`tracker::stage_states`]). Both
//! are pure and idempotent, so a client may apply a frame it has already
//! seen, or re-derive the state from a fresh fetch, and land on the same
//! result.

pub mod feed;
pub mod tracker;

pub use feed::OrderFeed;
pub use tracker::{StageState, stage_states};
