//! Tenant database operations

use sqlx::PgPool;

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub subdomain: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub status: String,
    pub plan: String,
    pub subscription_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

pub struct NewTenant<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub subdomain: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    tenant: &NewTenant<'_>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tenants (id, name, domain, subdomain, email, phone,
                             status, plan, subscription_status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'active', 'basic', 'active', $7, $7)
        "#,
    )
    .bind(id)
    .bind(tenant.name)
    .bind(tenant.domain)
    .bind(tenant.subdomain)
    .bind(tenant.email)
    .bind(tenant.phone)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_subdomain(
    pool: &PgPool,
    subdomain: &str,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE subdomain = $1")
        .bind(subdomain)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE domain = $1")
        .bind(domain)
        .fetch_optional(pool)
        .await
}

/// True if the subdomain or the contact email is already registered.
pub async fn subdomain_or_email_exists(
    pool: &PgPool,
    subdomain: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT id FROM tenants WHERE subdomain = $1 OR email = $2")
            .bind(subdomain)
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}
