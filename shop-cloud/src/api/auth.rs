//! Authentication endpoints: register, login, profile, change-password

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::TenantStatus;

use crate::auth::AuthContext;
use crate::auth::jwt;
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, now_millis, verify_password};

use super::ApiResult;

// ── Response types ──

#[derive(serde::Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&db::users::User> for UserInfo {
    fn from(user: &db::users::User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct TenantInfo {
    pub id: String,
    pub name: String,
    pub subdomain: String,
    pub plan: String,
}

impl From<&db::tenants::Tenant> for TenantInfo {
    fn from(tenant: &db::tenants::Tenant) -> Self {
        Self {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            subdomain: tenant.subdomain.clone(),
            plan: tenant.plan.clone(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
    pub tenant: TenantInfo,
}

// ── POST /api/auth/register ──

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub tenant_name: String,
    pub subdomain: String,
    pub phone: Option<String>,
}

fn valid_subdomain(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Create a tenant and its owner user, and issue a token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Valid email is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::validation("First name and last name are required"));
    }
    if req.tenant_name.trim().is_empty() {
        return Err(AppError::validation("Shop name is required"));
    }
    if !valid_subdomain(&req.subdomain) {
        return Err(AppError::new(ErrorCode::SubdomainInvalid));
    }

    let taken = db::tenants::subdomain_or_email_exists(&state.pool, &req.subdomain, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error checking subdomain: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if taken {
        return Err(AppError::with_message(
            ErrorCode::SubdomainTaken,
            "Subdomain or email already exists",
        ));
    }

    let existing = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error checking email: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if existing.is_some() {
        return Err(AppError::new(ErrorCode::EmailTaken));
    }

    let hashed_password = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hash error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let now = now_millis();
    let tenant_id = db::new_id();
    let domain = format!("{}.localhost", req.subdomain);
    db::tenants::create(
        &state.pool,
        &tenant_id,
        &db::tenants::NewTenant {
            name: req.tenant_name.trim(),
            domain: &domain,
            subdomain: &req.subdomain,
            email: &email,
            phone: req.phone.as_deref(),
        },
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("DB error creating tenant: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user_id = db::new_id();
    db::users::create(
        &state.pool,
        &user_id,
        &db::users::NewUser {
            tenant_id: &tenant_id,
            email: &email,
            hashed_password: &hashed_password,
            first_name: req.first_name.trim(),
            last_name: req.last_name.trim(),
            role: "owner",
        },
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("DB error creating owner user: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let token = jwt::create_token(&user_id, &tenant_id, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user = db::users::find_by_id(&state.pool, &user_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error reloading user: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;
    let tenant = db::tenants::find_by_id(&state.pool, &tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error reloading tenant: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;

    tracing::info!(subdomain = %tenant.subdomain, "Tenant registered");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
        tenant: TenantInfo::from(&tenant),
    }))
}

// ── POST /api/auth/login ──

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub subdomain: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();

    // Optional subdomain scoping for shops sharing a login page
    let scoped_tenant = match req.subdomain.as_deref() {
        Some(subdomain) => Some(
            db::tenants::find_by_subdomain(&state.pool, subdomain)
                .await
                .map_err(|e| {
                    tracing::error!("DB error during login: {e}");
                    AppError::new(ErrorCode::InternalError)
                })?
                .ok_or_else(|| {
                    AppError::with_message(ErrorCode::TenantNotFound, "Shop not found")
                })?,
        ),
        None => None,
    };

    let user = match &scoped_tenant {
        Some(tenant) => db::users::find_by_email_in_tenant(&state.pool, &email, &tenant.id).await,
        None => db::users::find_by_email(&state.pool, &email).await,
    }
    .map_err(|e| {
        tracing::error!("DB error during login: {e}");
        AppError::new(ErrorCode::InternalError)
    })?
    .ok_or_else(AppError::invalid_credentials)?;

    if user.status != "active" {
        return Err(AppError::invalid_credentials());
    }
    if !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let tenant = match scoped_tenant {
        Some(tenant) => tenant,
        None => db::tenants::find_by_id(&state.pool, &user.tenant_id)
            .await
            .map_err(|e| {
                tracing::error!("DB error loading tenant: {e}");
                AppError::new(ErrorCode::InternalError)
            })?
            .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?,
    };

    if !TenantStatus::from_db(&tenant.status).is_some_and(|s| s.is_active()) {
        return Err(AppError::with_message(
            ErrorCode::TenantSuspended,
            "Account is suspended",
        ));
    }

    let now = now_millis();
    let _ = db::users::update_last_login(&state.pool, &user.id, now).await;

    let token = jwt::create_token(&user.id, &tenant.id, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
        tenant: TenantInfo::from(&tenant),
    }))
}

// ── Profile endpoints ──

#[derive(serde::Serialize)]
pub struct ProfileResponse {
    pub user: serde_json::Value,
    pub tenant: serde_json::Value,
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
) -> ApiResult<ProfileResponse> {
    let user = db::users::find_by_id(&state.pool, &identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error loading profile: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let tenant = db::tenants::find_by_id(&state.pool, &identity.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error loading tenant: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    Ok(Json(ProfileResponse {
        user: serde_json::json!({
            "id": user.id,
            "email": user.email,
            "first_name": user.first_name,
            "last_name": user.last_name,
            "role": user.role,
            "phone": user.phone,
            "avatar": user.avatar,
            "last_login_at": user.last_login_at,
        }),
        tenant: serde_json::json!({
            "id": tenant.id,
            "name": tenant.name,
            "subdomain": tenant.subdomain,
            "domain": tenant.domain,
            "email": tenant.email,
            "phone": tenant.phone,
            "address": tenant.address,
            "logo": tenant.logo,
            "plan": tenant.plan,
            "subscription_status": tenant.subscription_status,
        }),
    }))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<UserInfo> {
    db::users::update_profile(
        &state.pool,
        &identity.user_id,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
        req.phone.as_deref(),
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("DB error updating profile: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user = db::users::find_by_id(&state.pool, &identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error reloading user: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(UserInfo::from(&user)))
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    if req.new_password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let user = db::users::find_by_id(&state.pool, &identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error loading user: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !verify_password(&req.current_password, &user.hashed_password) {
        return Err(AppError::new(ErrorCode::PasswordIncorrect));
    }

    let hashed = hash_password(&req.new_password).map_err(|e| {
        tracing::error!("Password hash error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    db::users::update_password(&state.pool, &user.id, &hashed, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("DB error updating password: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(
        serde_json::json!({ "message": "Password changed successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subdomain() {
        assert!(valid_subdomain("my-shop-2"));
        assert!(!valid_subdomain(""));
        assert!(!valid_subdomain("My-Shop"));
        assert!(!valid_subdomain("shop.example"));
        assert!(!valid_subdomain("shop space"));
    }
}
