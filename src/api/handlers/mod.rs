//! REST endpoint handlers organized by audience.

pub mod admin;
pub mod orders;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(orders::routes()).merge(admin::routes())
}
