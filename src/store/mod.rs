//! Storage layer: the in-memory stand-in for the external document store.

pub mod orders;

pub use orders::OrderStore;
