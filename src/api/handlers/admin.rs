//! Admin console handlers: open-order listing and status updates.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::orders::IdentityParams;
use crate::api::dto::{OrderDto, OrderListResponse, UpdateStatusRequest};
use crate::app_state::AppState;
use crate::domain::{OrderId, OrderStatus};
use crate::error::{ErrorResponse, GatewayError};

fn require_admin(identity: &IdentityParams) -> Result<(), GatewayError> {
    if identity.role.as_deref() == Some("admin") {
        Ok(())
    } else {
        Err(GatewayError::Forbidden("admin role required".to_string()))
    }
}

/// `GET /admin/orders` — List all not-yet-delivered orders, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::Forbidden`] without the admin role.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    tag = "Admin",
    summary = "List open orders",
    description = "The admin console's working set: every order that has not yet been delivered, newest first.",
    params(
        ("role" = String, Query, description = "Authenticated role; must be `admin`"),
    ),
    responses(
        (status = 200, description = "Open orders", body = OrderListResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
    )
)]
pub async fn list_open_orders(
    State(state): State<AppState>,
    Query(identity): Query<IdentityParams>,
) -> Result<impl IntoResponse, GatewayError> {
    require_admin(&identity)?;

    let orders = state.order_service.open_orders().await;
    let data: Vec<OrderDto> = orders.into_iter().map(OrderDto::from).collect();
    let total = data.len();

    Ok(Json(OrderListResponse { data, total }))
}

/// `POST /admin/orders/{id}/status` — Move an order to a new stage.
///
/// Persists the change, then pushes `orderUpdated` to the order's topic.
///
/// # Errors
///
/// Returns [`GatewayError`] for an unknown order, an unknown status
/// string, or a missing admin role.
#[utoipa::path(
    post,
    path = "/api/v1/admin/orders/{id}/status",
    tag = "Admin",
    summary = "Update an order's status",
    params(
        ("id" = uuid::Uuid, Path, description = "Order UUID"),
        ("role" = String, Query, description = "Authenticated role; must be `admin`"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderDto),
        (status = 400, description = "Unknown status string", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Query(identity): Query<IdentityParams>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    require_admin(&identity)?;

    let status: OrderStatus = req.status.parse()?;
    let record = state
        .order_service
        .update_status(OrderId::from_uuid(id), status)
        .await?;

    Ok(Json(OrderDto::from(record)))
}

/// Admin console routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(list_open_orders))
        .route("/admin/orders/{id}/status", post(update_order_status))
}
