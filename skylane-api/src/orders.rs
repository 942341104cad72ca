use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use skylane_core::orders::{Order, OrderPage, OrderPageRequest, TicketSpec};

use crate::error::AppError;
use crate::middleware::auth::{user_id, Claims};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub tickets: Vec<TicketSpec>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/orders
///
/// The whole purchase commits or none of it does; a seat conflict
/// surfaces as 409 so the caller can prompt re-selection.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let user_id = user_id(&claims)?;
    let order = state.order_repo.create_order(user_id, &req.tickets).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /v1/orders?page=&page_size=
///
/// Always scoped to the token subject; no query parameter widens it.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderPage>, AppError> {
    let user_id = user_id(&claims)?;

    let page_size = query
        .page_size
        .unwrap_or(state.orders.page_size)
        .min(state.orders.max_page_size);
    let page = OrderPageRequest::new(query.page, Some(page_size));

    Ok(Json(state.order_repo.list_orders(user_id, page).await?))
}
