//! Category database operations

use sqlx::PgPool;

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, serde::Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Category>, u64), sqlx::Error> {
    let pattern = search.map(|s| format!("%{s}%"));

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM categories
        WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
        "#,
    )
    .bind(tenant_id)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let rows: Vec<Category> = sqlx::query_as(
        r#"
        SELECT * FROM categories
        WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
        ORDER BY sort_order, name
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

/// Active categories for the storefront, no pagination.
pub async fn list_active(pool: &PgPool, tenant_id: &str) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM categories
        WHERE tenant_id = $1 AND is_active = TRUE
        ORDER BY sort_order, name
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// True if another category of this tenant already uses the slug.
pub async fn slug_exists(
    pool: &PgPool,
    tenant_id: &str,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT id FROM categories
        WHERE tenant_id = $1 AND slug = $2 AND ($3::TEXT IS NULL OR id <> $3)
        "#,
    )
    .bind(tenant_id)
    .bind(slug)
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
    data: &CategoryCreate,
    now: i64,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO categories (id, tenant_id, name, slug, description, image,
                                parent_id, sort_order, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.name)
    .bind(slug)
    .bind(&data.description)
    .bind(&data.image)
    .bind(&data.parent_id)
    .bind(data.sort_order.unwrap_or(0))
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    data: &CategoryUpdate,
    now: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE categories SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            description = COALESCE($3, description),
            image = COALESCE($4, image),
            parent_id = COALESCE($5, parent_id),
            sort_order = COALESCE($6, sort_order),
            is_active = COALESCE($7, is_active),
            updated_at = $8
        WHERE id = $9 AND tenant_id = $10
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.description)
    .bind(&data.image)
    .bind(&data.parent_id)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: &str, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// True if any product still references the category.
pub async fn has_products(pool: &PgPool, tenant_id: &str, id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT id FROM products WHERE category_id = $1 AND tenant_id = $2 LIMIT 1",
    )
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}
