//! API routes for shop-cloud

pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;
pub mod public;

use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{auth_middleware, require_admin, resolve_tenant};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

/// Common `?page=&limit=` query parameters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Clamp to sane bounds and return (page, per_page, offset)
    pub fn resolve(&self, default_limit: u32) -> (u32, u32, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.limit.unwrap_or(default_limit).clamp(1, 100);
        let offset = (page as i64 - 1) * per_page as i64;
        (page, per_page, offset)
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Storefront (tenant resolved by subdomain, no auth)
    let storefront = Router::new()
        .route("/shop", get(public::shop_info))
        .route("/products", get(public::list_products))
        .route("/products/featured", get(public::featured_products))
        .route("/products/{slug}", get(public::get_product))
        .route("/categories", get(public::list_categories))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_tenant,
        ));

    // Auth (register/login open, profile routes authenticated)
    let auth_api = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/profile", get(auth::get_profile).put(auth::update_profile))
                .route("/change-password", put(auth::change_password))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Catalog: reads for any dashboard user, writes admin-only
    let products_api = Router::new()
        .route("/", get(products::list))
        .route("/{id}", get(products::get))
        .merge(
            Router::new()
                .route("/", post(products::create))
                .route("/bulk-status", put(products::bulk_update_status))
                .route("/{id}", put(products::update).delete(products::delete))
                .layer(middleware::from_fn(require_admin)),
        );

    let categories_api = Router::new()
        .route("/", get(categories::list))
        .route("/{id}", get(categories::get))
        .merge(
            Router::new()
                .route("/", post(categories::create))
                .route("/{id}", put(categories::update).delete(categories::delete))
                .layer(middleware::from_fn(require_admin)),
        );

    let customers_api = Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        )
        .layer(middleware::from_fn(require_admin));

    let orders_api = Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::get))
        .merge(
            Router::new()
                .route("/", post(orders::create))
                .route("/stats", get(orders::stats))
                .route("/{id}/status", patch(orders::update_status))
                .route("/{id}/cancel", patch(orders::cancel))
                .layer(middleware::from_fn(require_admin)),
        );

    let dashboard_api = Router::new()
        .route("/overview", get(dashboard::overview))
        .route("/analytics", get(dashboard::analytics))
        .layer(middleware::from_fn(require_admin));

    // All dashboard APIs sit behind JWT auth + tenant/subscription checks
    let dashboard_apis = Router::new()
        .nest("/products", products_api)
        .nest("/categories", categories_api)
        .nest("/customers", customers_api)
        .nest("/orders", orders_api)
        .nest("/dashboard", dashboard_api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/public", storefront)
        .nest("/api/auth", auth_api)
        .nest("/api", dashboard_apis)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.resolve(20), (1, 20, 0));
    }

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.resolve(20), (1, 100, 0));

        let q = PageQuery {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(q.resolve(20), (3, 25, 50));
    }
}
