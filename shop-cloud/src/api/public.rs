//! Storefront endpoints — tenant resolved by subdomain, no authentication
//!
//! Responses never include cost prices or draft/archived products.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::response::PaginatedResponse;

use crate::auth::StorefrontContext;
use crate::db;
use crate::db::categories::Category;
use crate::db::products::{PublicFilter, PublicProduct};
use crate::state::AppState;

use super::{ApiResult, PageQuery};

/// GET /api/public/shop
pub async fn shop_info(
    Extension(ctx): Extension<StorefrontContext>,
) -> ApiResult<serde_json::Value> {
    let tenant = &ctx.tenant;
    Ok(Json(serde_json::json!({
        "shop": {
            "name": tenant.name,
            "domain": tenant.domain,
            "subdomain": tenant.subdomain,
            "logo": tenant.logo,
            "address": tenant.address,
            "phone": tenant.phone,
        }
    })))
}

/// GET /api/public/products
#[derive(Deserialize)]
pub struct PublicProductsQuery {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub featured: Option<bool>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<StorefrontContext>,
    Query(pagination): Query<PageQuery>,
    Query(query): Query<PublicProductsQuery>,
) -> ApiResult<PaginatedResponse<PublicProduct>> {
    let (page, per_page, offset) = pagination.resolve(20);

    let filter = PublicFilter {
        search: query.search.as_deref(),
        category_id: query.category_id.as_deref(),
        featured_only: query.featured.unwrap_or(false),
    };
    let (rows, total) = db::products::list_public(
        &state.pool,
        &ctx.tenant.id,
        &filter,
        per_page as i64,
        offset,
    )
    .await
    .map_err(|e| {
        tracing::error!("Public products query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(PaginatedResponse::new(rows, page, per_page, total)))
}

/// GET /api/public/products/{slug}
pub async fn get_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<StorefrontContext>,
    Path(slug): Path<String>,
) -> ApiResult<PublicProduct> {
    let product = db::products::find_public_by_slug(&state.pool, &ctx.tenant.id, &slug)
        .await
        .map_err(|e| {
            tracing::error!("Public product query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let _ = db::products::increment_view_count(&state.pool, &ctx.tenant.id, &product.id).await;

    Ok(Json(product))
}

/// GET /api/public/products/featured?limit=8
#[derive(Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

pub async fn featured_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<StorefrontContext>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<Vec<PublicProduct>> {
    let limit = query.limit.unwrap_or(8).clamp(1, 50);

    let products = db::products::list_featured(&state.pool, &ctx.tenant.id, limit)
        .await
        .map_err(|e| {
            tracing::error!("Featured products query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(products))
}

/// GET /api/public/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(ctx): Extension<StorefrontContext>,
) -> ApiResult<Vec<Category>> {
    let categories = db::categories::list_active(&state.pool, &ctx.tenant.id)
        .await
        .map_err(|e| {
            tracing::error!("Public categories query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(categories))
}
