//! Product catalog endpoints (admin dashboard)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::ProductStatus;
use shared::response::PaginatedResponse;

use crate::auth::AuthContext;
use crate::db;
use crate::db::products::{Product, ProductCreate, ProductFilter, ProductUpdate};
use crate::state::AppState;
use crate::util::{now_millis, slugify};

use super::{ApiResult, PageQuery};

/// GET /api/products
#[derive(Deserialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Query(pagination): Query<PageQuery>,
    Query(query): Query<ProductsQuery>,
) -> ApiResult<PaginatedResponse<Product>> {
    let (page, per_page, offset) = pagination.resolve(20);

    let filter = ProductFilter {
        search: query.search.as_deref(),
        category_id: query.category_id.as_deref(),
        status: query.status.as_deref(),
    };
    let (rows, total) = db::products::list(
        &state.pool,
        &identity.tenant_id,
        &filter,
        per_page as i64,
        offset,
    )
    .await
    .map_err(|e| {
        tracing::error!("Products query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(PaginatedResponse::new(rows, page, per_page, total)))
}

/// GET /api/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let product = db::products::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Product query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let _ = db::products::increment_view_count(&state.pool, &identity.tenant_id, &id).await;

    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<ProductCreate>,
) -> ApiResult<Product> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if req.sku.trim().is_empty() {
        return Err(AppError::validation("SKU is required"));
    }
    if req.price < Decimal::ZERO {
        return Err(AppError::validation("Price must be a positive number"));
    }
    if req.inventory.is_some_and(|n| n < 0) {
        return Err(AppError::validation(
            "Inventory must be a non-negative integer",
        ));
    }
    if let Some(ref status) = req.status
        && ProductStatus::from_db(status).is_none()
    {
        return Err(AppError::validation("Invalid product status"));
    }

    let sku_taken = db::products::sku_exists(&state.pool, &identity.tenant_id, &req.sku, None)
        .await
        .map_err(|e| {
            tracing::error!("SKU check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if sku_taken {
        return Err(AppError::new(ErrorCode::SkuExists));
    }

    let category = db::categories::find(&state.pool, &identity.tenant_id, &req.category_id)
        .await
        .map_err(|e| {
            tracing::error!("Category check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if category.is_none() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            "Invalid category",
        ));
    }

    let slug = match req.slug.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(&req.name),
    };

    let product = db::products::create(
        &state.pool,
        &identity.tenant_id,
        &db::new_id(),
        &slug,
        &req,
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Product create error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(product))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<ProductUpdate>,
) -> ApiResult<Product> {
    let existing = db::products::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Product query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    if let Some(ref sku) = req.sku
        && sku != &existing.sku
    {
        let taken = db::products::sku_exists(&state.pool, &identity.tenant_id, sku, Some(&id))
            .await
            .map_err(|e| {
                tracing::error!("SKU check error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;
        if taken {
            return Err(AppError::new(ErrorCode::SkuExists));
        }
    }

    if let Some(ref category_id) = req.category_id {
        let category = db::categories::find(&state.pool, &identity.tenant_id, category_id)
            .await
            .map_err(|e| {
                tracing::error!("Category check error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;
        if category.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                "Invalid category",
            ));
        }
    }

    if let Some(price) = req.price
        && price < Decimal::ZERO
    {
        return Err(AppError::validation("Price must be a positive number"));
    }
    if let Some(ref status) = req.status
        && ProductStatus::from_db(status).is_none()
    {
        return Err(AppError::validation("Invalid product status"));
    }

    let product = db::products::update(&state.pool, &identity.tenant_id, &id, &req, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Product update error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::products::delete(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Product delete error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }

    Ok(Json(
        serde_json::json!({ "message": "Product deleted successfully" }),
    ))
}

/// PUT /api/products/bulk-status
#[derive(Deserialize)]
pub struct BulkStatusRequest {
    pub product_ids: Vec<String>,
    pub status: String,
}

pub async fn bulk_update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<BulkStatusRequest>,
) -> ApiResult<serde_json::Value> {
    if ProductStatus::from_db(&req.status).is_none() {
        return Err(AppError::validation("Invalid product status"));
    }

    let updated = db::products::bulk_update_status(
        &state.pool,
        &identity.tenant_id,
        &req.product_ids,
        &req.status,
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Bulk status update error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(serde_json::json!({ "updated": updated })))
}
