//! Data Transfer Objects for REST request/response serialization.

pub mod order_dto;

pub use order_dto::*;
