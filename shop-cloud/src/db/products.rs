//! Product database operations
//!
//! Inventory and sales_count are mutated only by the order placement and
//! cancellation transactions in [`super::orders`]; everything here is
//! catalog management.

use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub tenant_id: String,
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub images: Vec<String>,
    pub inventory: i32,
    pub track_inventory: bool,
    pub weight: Option<Decimal>,
    pub tags: Vec<String>,
    pub status: String,
    pub is_featured: bool,
    pub sales_count: i32,
    pub view_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Storefront projection — cost_price is never exposed publicly.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PublicProduct {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub images: Vec<String>,
    pub inventory: i32,
    pub track_inventory: bool,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: i64,
}

const PUBLIC_COLUMNS: &str = "p.id, p.category_id, p.name, p.slug, p.description, \
     p.short_description, p.sku, p.price, p.compare_price, p.images, p.inventory, \
     p.track_inventory, p.tags, p.is_featured, p.created_at";

#[derive(Debug, serde::Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub category_id: String,
    pub images: Option<Vec<String>>,
    pub inventory: Option<i32>,
    pub track_inventory: Option<bool>,
    pub weight: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub compare_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub category_id: Option<String>,
    pub images: Option<Vec<String>>,
    pub inventory: Option<i32>,
    pub track_inventory: Option<bool>,
    pub weight: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
}

// ── Admin queries ──

pub struct ProductFilter<'a> {
    pub search: Option<&'a str>,
    pub category_id: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    filter: &ProductFilter<'_>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Product>, u64), sqlx::Error> {
    let pattern = filter.search.map(|s| format!("%{s}%"));

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM products
        WHERE tenant_id = $1
            AND ($2::TEXT IS NULL OR name ILIKE $2 OR sku ILIKE $2 OR description ILIKE $2)
            AND ($3::TEXT IS NULL OR category_id = $3)
            AND ($4::TEXT IS NULL OR status = $4)
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .bind(filter.category_id)
    .bind(filter.status)
    .fetch_one(pool)
    .await?;

    let rows: Vec<Product> = sqlx::query_as(
        r#"
        SELECT * FROM products
        WHERE tenant_id = $1
            AND ($2::TEXT IS NULL OR name ILIKE $2 OR sku ILIKE $2 OR description ILIKE $2)
            AND ($3::TEXT IS NULL OR category_id = $3)
            AND ($4::TEXT IS NULL OR status = $4)
        ORDER BY created_at DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .bind(filter.category_id)
    .bind(filter.status)
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
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// True if another product of this tenant already uses the SKU.
pub async fn sku_exists(
    pool: &PgPool,
    tenant_id: &str,
    sku: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT id FROM products
        WHERE tenant_id = $1 AND sku = $2 AND ($3::TEXT IS NULL OR id <> $3)
        "#,
    )
    .bind(tenant_id)
    .bind(sku)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn create(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    slug: &str,
    data: &ProductCreate,
    now: i64,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO products (id, tenant_id, category_id, name, slug, description,
                              short_description, sku, price, compare_price, cost_price,
                              images, inventory, track_inventory, weight, tags,
                              status, is_featured, sales_count, view_count,
                              created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, 0, 0, $19, $19)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.category_id)
    .bind(&data.name)
    .bind(slug)
    .bind(&data.description)
    .bind(&data.short_description)
    .bind(&data.sku)
    .bind(data.price)
    .bind(data.compare_price)
    .bind(data.cost_price)
    .bind(data.images.clone().unwrap_or_default())
    .bind(data.inventory.unwrap_or(0))
    .bind(data.track_inventory.unwrap_or(true))
    .bind(data.weight)
    .bind(data.tags.clone().unwrap_or_default())
    .bind(data.status.as_deref().unwrap_or("draft"))
    .bind(data.is_featured.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    data: &ProductUpdate,
    now: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE products SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            description = COALESCE($3, description),
            short_description = COALESCE($4, short_description),
            sku = COALESCE($5, sku),
            price = COALESCE($6, price),
            compare_price = COALESCE($7, compare_price),
            cost_price = COALESCE($8, cost_price),
            category_id = COALESCE($9, category_id),
            images = COALESCE($10, images),
            inventory = COALESCE($11, inventory),
            track_inventory = COALESCE($12, track_inventory),
            weight = COALESCE($13, weight),
            tags = COALESCE($14, tags),
            status = COALESCE($15, status),
            is_featured = COALESCE($16, is_featured),
            updated_at = $17
        WHERE id = $18 AND tenant_id = $19
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.description)
    .bind(&data.short_description)
    .bind(&data.sku)
    .bind(data.price)
    .bind(data.compare_price)
    .bind(data.cost_price)
    .bind(&data.category_id)
    .bind(&data.images)
    .bind(data.inventory)
    .bind(data.track_inventory)
    .bind(data.weight)
    .bind(&data.tags)
    .bind(&data.status)
    .bind(data.is_featured)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: &str, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn bulk_update_status(
    pool: &PgPool,
    tenant_id: &str,
    ids: &[String],
    status: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = sqlx::query(
        "UPDATE products SET status = $1, updated_at = $2 WHERE tenant_id = $3 AND id = ANY($4)",
    )
    .bind(status)
    .bind(now)
    .bind(tenant_id)
    .bind(ids)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn increment_view_count(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET view_count = view_count + 1 WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(())
}

// ── Storefront queries ──

pub struct PublicFilter<'a> {
    pub search: Option<&'a str>,
    pub category_id: Option<&'a str>,
    pub featured_only: bool,
}

pub async fn list_public(
    pool: &PgPool,
    tenant_id: &str,
    filter: &PublicFilter<'_>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<PublicProduct>, u64), sqlx::Error> {
    let pattern = filter.search.map(|s| format!("%{s}%"));

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM products p
        JOIN categories c ON c.id = p.category_id AND c.is_active = TRUE
        WHERE p.tenant_id = $1 AND p.status = 'active'
            AND ($2::TEXT IS NULL OR p.name ILIKE $2 OR p.description ILIKE $2)
            AND ($3::TEXT IS NULL OR p.category_id = $3)
            AND (NOT $4 OR p.is_featured)
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .bind(filter.category_id)
    .bind(filter.featured_only)
    .fetch_one(pool)
    .await?;

    let sql = format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM products p
        JOIN categories c ON c.id = p.category_id AND c.is_active = TRUE
        WHERE p.tenant_id = $1 AND p.status = 'active'
            AND ($2::TEXT IS NULL OR p.name ILIKE $2 OR p.description ILIKE $2)
            AND ($3::TEXT IS NULL OR p.category_id = $3)
            AND (NOT $4 OR p.is_featured)
        ORDER BY p.is_featured DESC, p.created_at DESC
        LIMIT $5 OFFSET $6
        "#
    );
    let rows: Vec<PublicProduct> = sqlx::query_as(&sql)
        .bind(tenant_id)
        .bind(&pattern)
        .bind(filter.category_id)
        .bind(filter.featured_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok((rows, total as u64))
}

pub async fn find_public_by_slug(
    pool: &PgPool,
    tenant_id: &str,
    slug: &str,
) -> Result<Option<PublicProduct>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM products p
        JOIN categories c ON c.id = p.category_id AND c.is_active = TRUE
        WHERE p.tenant_id = $1 AND p.slug = $2 AND p.status = 'active'
        "#
    );
    sqlx::query_as(&sql)
        .bind(tenant_id)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn list_featured(
    pool: &PgPool,
    tenant_id: &str,
    limit: i64,
) -> Result<Vec<PublicProduct>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM products p
        JOIN categories c ON c.id = p.category_id AND c.is_active = TRUE
        WHERE p.tenant_id = $1 AND p.status = 'active' AND p.is_featured
        ORDER BY p.created_at DESC
        LIMIT $2
        "#
    );
    sqlx::query_as(&sql)
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}
