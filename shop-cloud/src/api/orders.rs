//! Order endpoints: list, detail, placement, status transitions, cancel, stats
//!
//! Placement and cancellation delegate to the transactional core in
//! [`crate::db::orders`]; handlers only translate HTTP in and out.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use shared::response::PaginatedResponse;

use crate::auth::AuthContext;
use crate::db;
use crate::db::orders::{Order, OrderCreate, OrderDetail, OrderStats, OrderSummary};
use crate::state::AppState;

use super::{ApiResult, PageQuery};

/// GET /api/orders
#[derive(Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Query(pagination): Query<PageQuery>,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<PaginatedResponse<OrderSummary>> {
    let (page, per_page, offset) = pagination.resolve(20);

    let (rows, total) = db::orders::list(
        &state.pool,
        &identity.tenant_id,
        query.status.as_deref(),
        query.payment_status.as_deref(),
        per_page as i64,
        offset,
    )
    .await
    .map_err(|e| {
        tracing::error!("Orders query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(PaginatedResponse::new(rows, page, per_page, total)))
}

/// GET /api/orders/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<OrderDetail> {
    let detail = db::orders::get_detail(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Order detail query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    Ok(Json(detail))
}

#[derive(serde::Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: OrderDetail,
}

/// POST /api/orders
///
/// The whole placement — validation, inventory reservation, snapshots,
/// customer aggregates — runs as one transaction; a failure at any step
/// leaves no trace.
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<CreateOrderResponse> {
    let order = db::orders::place_order(&state.pool, &identity.tenant_id, &req)
        .await
        .map_err(AppError::from)?;

    Ok(Json(CreateOrderResponse {
        message: "Order created successfully".to_string(),
        order,
    }))
}

/// PATCH /api/orders/{id}/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub tracking_number: Option<String>,
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Order> {
    let target = OrderStatus::from_db(&req.status)
        .ok_or_else(|| AppError::validation(format!("Unknown order status: {}", req.status)))?;

    let order = db::orders::update_status(
        &state.pool,
        &identity.tenant_id,
        &id,
        target,
        req.tracking_number.as_deref(),
    )
    .await
    .map_err(AppError::from)?;

    Ok(Json(order))
}

/// PATCH /api/orders/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Order> {
    let order = db::orders::cancel_order(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(AppError::from)?;

    Ok(Json(order))
}

/// GET /api/orders/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
) -> ApiResult<OrderStats> {
    let stats = db::orders::stats(&state.pool, &identity.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("Order stats query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(stats))
}
