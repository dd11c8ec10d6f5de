//! Request authentication and tenant resolution middleware
//!
//! The authenticated identity is threaded through handlers as an explicit
//! [`AuthContext`] extension (user + tenant + role); core operations take
//! `tenant_id` as a plain parameter and never read ambient globals.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::models::{SubscriptionStatus, TenantStatus, UserRole};

use crate::auth::jwt;
use crate::db;
use crate::state::AppState;

/// Authenticated dashboard identity extracted from JWT + DB
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub tenant_id: String,
    pub role: UserRole,
}

/// Storefront tenant resolved from subdomain or host
#[derive(Clone)]
pub struct StorefrontContext {
    pub tenant: db::tenants::Tenant,
}

/// Middleware that extracts and verifies a dashboard JWT, loads the user and
/// tenant rows, and rejects inactive accounts/tenants/subscriptions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| error_response(401, "Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| error_response(401, "Invalid Authorization format"))?;

    let claims = jwt::decode_token(token, &state.jwt_secret).map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        error_response(401, "Invalid or expired token")
    })?;

    let user = db::users::find_by_id(&state.pool, &claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("DB error loading user: {e}");
            error_response(500, "Internal server error")
        })?
        .ok_or_else(|| error_response(401, "Invalid token"))?;

    if user.status != "active" {
        return Err(error_response(401, "Account is inactive"));
    }

    // Token tenant must match the user row; a stale token after a tenant
    // move must not grant access to the old tenant's data.
    if user.tenant_id != claims.tenant {
        return Err(error_response(401, "Invalid token"));
    }

    let tenant = db::tenants::find_by_id(&state.pool, &user.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error loading tenant: {e}");
            error_response(500, "Internal server error")
        })?
        .ok_or_else(|| error_response(401, "Invalid token"))?;

    if !TenantStatus::from_db(&tenant.status).is_some_and(|s| s.is_active()) {
        return Err(error_response(403, "Tenant account is inactive"));
    }

    if !SubscriptionStatus::from_db(&tenant.subscription_status).is_some_and(|s| s.is_active()) {
        return Err(error_response(402, "Subscription is not active"));
    }

    let role = UserRole::from_db(&user.role)
        .ok_or_else(|| error_response(401, "Invalid token"))?;

    let identity = AuthContext {
        user_id: user.id,
        tenant_id: tenant.id,
        role,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Middleware that requires an admin (owner or admin) role.
///
/// Must run after [`auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    let identity = request
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| error_response(401, "Authentication required"))?;

    if !identity.role.is_admin() {
        return Err(error_response(403, "Admin role required"));
    }

    Ok(next.run(request).await)
}

/// Middleware that resolves the storefront tenant from the
/// `X-Tenant-Subdomain` header or the request Host.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let subdomain = request
        .headers()
        .get("X-Tenant-Subdomain")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let tenant = if let Some(subdomain) = subdomain {
        db::tenants::find_by_subdomain(&state.pool, &subdomain).await
    } else {
        let host = request
            .headers()
            .get("Host")
            .and_then(|v| v.to_str().ok())
            .map(|h| h.split(':').next().unwrap_or(h).to_string())
            .ok_or_else(|| error_response(404, "Tenant not found"))?;
        db::tenants::find_by_domain(&state.pool, &host).await
    };

    let tenant = tenant
        .map_err(|e| {
            tracing::error!("Tenant resolution error: {e}");
            error_response(500, "Internal server error")
        })?
        .ok_or_else(|| error_response(404, "Tenant not found"))?;

    if !TenantStatus::from_db(&tenant.status).is_some_and(|s| s.is_active()) {
        return Err(error_response(403, "Tenant is not active"));
    }

    request.extensions_mut().insert(StorefrontContext { tenant });

    Ok(next.run(request).await)
}

fn error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    let status =
        http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(body)).into_response()
}
