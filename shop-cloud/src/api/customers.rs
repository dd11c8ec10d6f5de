//! Customer endpoints (admin dashboard)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::response::PaginatedResponse;

use crate::auth::AuthContext;
use crate::db;
use crate::db::customers::{Customer, CustomerCreate, CustomerUpdate};
use crate::db::orders::Order;
use crate::state::AppState;
use crate::util::now_millis;

use super::{ApiResult, PageQuery};

/// GET /api/customers
#[derive(Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Query(pagination): Query<PageQuery>,
    Query(query): Query<CustomersQuery>,
) -> ApiResult<PaginatedResponse<Customer>> {
    let (page, per_page, offset) = pagination.resolve(20);

    let (rows, total) = db::customers::list(
        &state.pool,
        &identity.tenant_id,
        query.search.as_deref(),
        per_page as i64,
        offset,
    )
    .await
    .map_err(|e| {
        tracing::error!("Customers query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(PaginatedResponse::new(rows, page, per_page, total)))
}

/// Customer detail with their most recent orders
#[derive(serde::Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub orders: Vec<Order>,
}

/// GET /api/customers/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<CustomerDetail> {
    let customer = db::customers::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Customer query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    let orders = db::orders::list_recent_for_customer(&state.pool, &identity.tenant_id, &id, 10)
        .await
        .map_err(|e| {
            tracing::error!("Customer orders query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(CustomerDetail { customer, orders }))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<CustomerCreate>,
) -> ApiResult<Customer> {
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::validation("Valid email is required"));
    }
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::validation("First name and last name are required"));
    }

    let taken = db::customers::email_exists(&state.pool, &identity.tenant_id, &req.email, None)
        .await
        .map_err(|e| {
            tracing::error!("Customer email check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if taken {
        return Err(AppError::new(ErrorCode::CustomerEmailExists));
    }

    let customer = db::customers::create(
        &state.pool,
        &identity.tenant_id,
        &db::new_id(),
        &req,
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Customer create error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(customer))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    let existing = db::customers::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Customer query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    if let Some(ref email) = req.email
        && email != &existing.email
    {
        let taken =
            db::customers::email_exists(&state.pool, &identity.tenant_id, email, Some(&id))
                .await
                .map_err(|e| {
                    tracing::error!("Customer email check error: {e}");
                    AppError::new(ErrorCode::InternalError)
                })?;
        if taken {
            return Err(AppError::new(ErrorCode::CustomerEmailExists));
        }
    }

    let customer = db::customers::update(&state.pool, &identity.tenant_id, &id, &req, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Customer update error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    Ok(Json(customer))
}

/// DELETE /api/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::customers::delete(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Customer delete error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::CustomerNotFound));
    }

    Ok(Json(
        serde_json::json!({ "message": "Customer deleted successfully" }),
    ))
}
