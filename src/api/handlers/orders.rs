//! Customer-facing order handlers: place, list, get.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::dto::{OrderDto, OrderListResponse, PlaceOrderRequest};
use crate::app_state::AppState;
use crate::domain::{CustomerId, CustomerRef, OrderId, OrderLine};
use crate::error::{ErrorResponse, GatewayError};

/// Identity query parameters supplied by the external auth layer.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityParams {
    /// Authenticated customer ID.
    pub customer_id: Option<uuid::Uuid>,
    /// Authenticated role; `"admin"` bypasses ownership checks.
    pub role: Option<String>,
}

impl IdentityParams {
    fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// `POST /orders` — Place a new order.
///
/// Persists the order, then broadcasts `orderPlaced` to the admin room.
///
/// # Errors
///
/// Returns [`GatewayError`] when the cart is empty.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "Place an order",
    description = "Persists a new order from the session cart and notifies connected admin dashboards in real time.",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderDto),
        (status = 400, description = "Empty cart or invalid request", body = ErrorResponse),
    )
)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let customer = CustomerRef {
        id: CustomerId::from_uuid(req.customer_id),
        name: req.customer_name,
    };
    let items = req
        .items
        .into_iter()
        .map(|(k, v)| (k, OrderLine::from(v)))
        .collect();

    let record = state
        .order_service
        .place_order(customer, items, req.addgift)
        .await?;

    Ok((StatusCode::CREATED, Json(OrderDto::from(record))))
}

/// `GET /orders` — List the authenticated customer's orders, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when no customer ID is supplied.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "List a customer's orders",
    params(
        ("customer_id" = uuid::Uuid, Query, description = "Authenticated customer ID"),
    ),
    responses(
        (status = 200, description = "Order history, newest first", body = OrderListResponse),
        (status = 400, description = "Missing customer ID", body = ErrorResponse),
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(identity): Query<IdentityParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let Some(customer_id) = identity.customer_id else {
        return Err(GatewayError::InvalidRequest(
            "customer_id is required".to_string(),
        ));
    };

    let orders = state
        .order_service
        .orders_for_customer(CustomerId::from_uuid(customer_id))
        .await;
    let data: Vec<OrderDto> = orders.into_iter().map(OrderDto::from).collect();
    let total = data.len();

    Ok(Json(OrderListResponse { data, total }))
}

/// `GET /orders/{id}` — Fetch a single order.
///
/// Only the order's owner (or an admin) may read it.
///
/// # Errors
///
/// Returns [`GatewayError`] when the order is unknown or owned by someone
/// else.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Orders",
    summary = "Get one order",
    params(
        ("id" = uuid::Uuid, Path, description = "Order UUID"),
        ("customer_id" = Option<uuid::Uuid>, Query, description = "Authenticated customer ID"),
        ("role" = Option<String>, Query, description = "Authenticated role"),
    ),
    responses(
        (status = 200, description = "The order", body = OrderDto),
        (status = 403, description = "Not the order's owner", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Query(identity): Query<IdentityParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let record = state.order_service.get_order(OrderId::from_uuid(id)).await?;

    let owner = identity
        .customer_id
        .map(CustomerId::from_uuid)
        .is_some_and(|c| c == record.customer_id.id);
    if !owner && !identity.is_admin() {
        return Err(GatewayError::Forbidden(
            "only the order's owner may read it".to_string(),
        ));
    }

    Ok(Json(OrderDto::from(record)))
}

/// Customer order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(place_order).get(list_orders))
        .route("/orders/{id}", get(get_order))
}
