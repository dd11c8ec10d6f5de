//! Category endpoints (admin dashboard)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::response::PaginatedResponse;

use crate::auth::AuthContext;
use crate::db;
use crate::db::categories::{Category, CategoryCreate, CategoryUpdate};
use crate::state::AppState;
use crate::util::{now_millis, slugify};

use super::{ApiResult, PageQuery};

/// GET /api/categories
#[derive(Deserialize)]
pub struct CategoriesQuery {
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Query(pagination): Query<PageQuery>,
    Query(query): Query<CategoriesQuery>,
) -> ApiResult<PaginatedResponse<Category>> {
    let (page, per_page, offset) = pagination.resolve(50);

    let (rows, total) = db::categories::list(
        &state.pool,
        &identity.tenant_id,
        query.search.as_deref(),
        per_page as i64,
        offset,
    )
    .await
    .map_err(|e| {
        tracing::error!("Categories query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(PaginatedResponse::new(rows, page, per_page, total)))
}

/// GET /api/categories/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Category> {
    let category = db::categories::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Category query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<CategoryCreate>,
) -> ApiResult<Category> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Category name is required"));
    }

    let slug = match req.slug.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(&req.name),
    };

    let taken = db::categories::slug_exists(&state.pool, &identity.tenant_id, &slug, None)
        .await
        .map_err(|e| {
            tracing::error!("Slug check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if taken {
        return Err(AppError::new(ErrorCode::SlugExists));
    }

    let category = db::categories::create(
        &state.pool,
        &identity.tenant_id,
        &db::new_id(),
        &slug,
        &req,
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Category create error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(category))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    let existing = db::categories::find(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Category query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    if let Some(ref slug) = req.slug
        && slug != &existing.slug
    {
        let taken = db::categories::slug_exists(&state.pool, &identity.tenant_id, slug, Some(&id))
            .await
            .map_err(|e| {
                tracing::error!("Slug check error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;
        if taken {
            return Err(AppError::new(ErrorCode::SlugExists));
        }
    }

    let category = db::categories::update(&state.pool, &identity.tenant_id, &id, &req, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Category update error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let in_use = db::categories::has_products(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Category usage check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if in_use {
        return Err(AppError::new(ErrorCode::CategoryHasProducts));
    }

    let deleted = db::categories::delete(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Category delete error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }

    Ok(Json(
        serde_json::json!({ "message": "Category deleted successfully" }),
    ))
}
