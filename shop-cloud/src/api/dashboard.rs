//! Dashboard endpoints: overview and sales analytics

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use crate::auth::AuthContext;
use crate::db;
use crate::db::dashboard::{DashboardOverview, SalesAnalytics};
use crate::state::AppState;

use super::ApiResult;

/// GET /api/dashboard/overview
pub async fn overview(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
) -> ApiResult<DashboardOverview> {
    let overview = db::dashboard::overview(&state.pool, &identity.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("Dashboard overview query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(overview))
}

/// GET /api/dashboard/analytics?days=30
#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

pub async fn analytics(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<SalesAnalytics> {
    let days = query.days.unwrap_or(30).clamp(1, 365);

    let analytics = db::dashboard::sales_analytics(&state.pool, &identity.tenant_id, days)
        .await
        .map_err(|e| {
            tracing::error!("Sales analytics query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(analytics))
}
