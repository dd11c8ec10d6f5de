//! Customer database operations
//!
//! total_orders / total_spent / last_order_at are derived counters owned by
//! the order placement transaction; they are never recomputed from order
//! rows here.

use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: String,
    pub tenant_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub total_orders: i32,
    pub total_spent: Decimal,
    pub last_order_at: Option<i64>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, serde::Deserialize)]
pub struct CustomerCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CustomerUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Customer>, u64), sqlx::Error> {
    let pattern = search.map(|s| format!("%{s}%"));

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM customers
        WHERE tenant_id = $1
            AND ($2::TEXT IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let rows: Vec<Customer> = sqlx::query_as(
        r#"
        SELECT * FROM customers
        WHERE tenant_id = $1
            AND ($2::TEXT IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total as u64))
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// True if another customer of this tenant already uses the email.
pub async fn email_exists(
    pool: &PgPool,
    tenant_id: &str,
    email: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT id FROM customers
        WHERE tenant_id = $1 AND email = $2 AND ($3::TEXT IS NULL OR id <> $3)
        "#,
    )
    .bind(tenant_id)
    .bind(email)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn create(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    data: &CustomerCreate,
    now: i64,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO customers (id, tenant_id, email, first_name, last_name, phone,
                               address, city, state, country, zip_code, notes,
                               status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'active', $13, $13)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.country)
    .bind(&data.zip_code)
    .bind(&data.notes)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    data: &CustomerUpdate,
    now: i64,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE customers SET
            email = COALESCE($1, email),
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            phone = COALESCE($4, phone),
            address = COALESCE($5, address),
            city = COALESCE($6, city),
            state = COALESCE($7, state),
            country = COALESCE($8, country),
            zip_code = COALESCE($9, zip_code),
            notes = COALESCE($10, notes),
            status = COALESCE($11, status),
            updated_at = $12
        WHERE id = $13 AND tenant_id = $14
        RETURNING *
        "#,
    )
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.country)
    .bind(&data.zip_code)
    .bind(&data.notes)
    .bind(&data.status)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: &str, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
