//! Database access layer
//!
//! All queries enforce tenant_id isolation.

pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod tenants;
pub mod users;

/// Generate a fresh primary key (UUID v4, stored as TEXT)
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
