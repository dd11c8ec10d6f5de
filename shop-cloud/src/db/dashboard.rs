//! Dashboard aggregate queries
//!
//! Pure tenant-scoped reads; no invariant here beyond tenant isolation.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::orders::OrderSummary;
use super::products::Product;
use crate::util::{days_ago_millis, start_of_month_millis};

/// Headline counters for the dashboard overview
#[derive(Debug, serde::Serialize)]
pub struct OverviewTotals {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub monthly_orders: i64,
    pub monthly_revenue: Decimal,
    pub weekly_orders: i64,
    pub weekly_revenue: Decimal,
}

/// Best-selling product aggregated from order item snapshots
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: String,
    pub total_sold: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, serde::Serialize)]
pub struct DashboardOverview {
    pub overview: OverviewTotals,
    pub low_stock_products: Vec<Product>,
    pub top_selling_products: Vec<TopProduct>,
    pub recent_orders: Vec<OrderSummary>,
}

/// One day of the sales analytics series
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct DailySales {
    pub date: String,
    pub orders: i64,
    pub revenue: Decimal,
}

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct SalesAnalytics {
    pub daily_sales: Vec<DailySales>,
    pub order_status_breakdown: Vec<StatusCount>,
}

const LOW_STOCK_THRESHOLD: i32 = 10;

pub async fn overview(pool: &PgPool, tenant_id: &str) -> Result<DashboardOverview, sqlx::Error> {
    let month_start = start_of_month_millis();
    let week_start = days_ago_millis(7);

    let (total_products,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;

    let (total_customers,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM customers WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;

    let (total_orders, monthly_orders, weekly_orders): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE created_at >= $2),
               COUNT(*) FILTER (WHERE created_at >= $3)
        FROM orders
        WHERE tenant_id = $1
        "#,
    )
    .bind(tenant_id)
    .bind(month_start)
    .bind(week_start)
    .fetch_one(pool)
    .await?;

    let (total_revenue, monthly_revenue, weekly_revenue): (Decimal, Decimal, Decimal) =
        sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0),
                   COALESCE(SUM(total_amount) FILTER (WHERE created_at >= $2), 0),
                   COALESCE(SUM(total_amount) FILTER (WHERE created_at >= $3), 0)
            FROM orders
            WHERE tenant_id = $1 AND payment_status = 'paid'
            "#,
        )
        .bind(tenant_id)
        .bind(month_start)
        .bind(week_start)
        .fetch_one(pool)
        .await?;

    let low_stock_products: Vec<Product> = sqlx::query_as(
        r#"
        SELECT * FROM products
        WHERE tenant_id = $1 AND track_inventory = TRUE AND inventory <= $2
        ORDER BY inventory ASC
        LIMIT 10
        "#,
    )
    .bind(tenant_id)
    .bind(LOW_STOCK_THRESHOLD)
    .fetch_all(pool)
    .await?;

    // Snapshots, not live products: a renamed or deleted product keeps its
    // historical sales under the name it was sold as.
    let top_selling_products: Vec<TopProduct> = sqlx::query_as(
        r#"
        SELECT oi.product_id, oi.product_name,
               SUM(oi.quantity)::BIGINT AS total_sold,
               SUM(oi.total_price) AS total_revenue
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE o.tenant_id = $1
        GROUP BY oi.product_id, oi.product_name
        ORDER BY total_sold DESC
        LIMIT 10
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    let recent_orders: Vec<OrderSummary> = sqlx::query_as(
        r#"
        SELECT o.id, o.customer_id, o.order_number, o.status, o.payment_status,
               o.total_amount, o.currency, o.created_at,
               c.first_name AS customer_first_name,
               c.last_name AS customer_last_name,
               c.email AS customer_email
        FROM orders o
        JOIN customers c ON c.id = o.customer_id
        WHERE o.tenant_id = $1
        ORDER BY o.created_at DESC
        LIMIT 10
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(DashboardOverview {
        overview: OverviewTotals {
            total_products,
            total_customers,
            total_orders,
            total_revenue,
            monthly_orders,
            monthly_revenue,
            weekly_orders,
            weekly_revenue,
        },
        low_stock_products,
        top_selling_products,
        recent_orders,
    })
}

pub async fn sales_analytics(
    pool: &PgPool,
    tenant_id: &str,
    days: i64,
) -> Result<SalesAnalytics, sqlx::Error> {
    let since = days_ago_millis(days);

    let daily_sales: Vec<DailySales> = sqlx::query_as(
        r#"
        SELECT to_char(to_timestamp(created_at / 1000.0) AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date,
               COUNT(*)::BIGINT AS orders,
               COALESCE(SUM(total_amount), 0) AS revenue
        FROM orders
        WHERE tenant_id = $1 AND payment_status = 'paid' AND created_at >= $2
        GROUP BY 1
        ORDER BY 1 ASC
        "#,
    )
    .bind(tenant_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    let order_status_breakdown: Vec<StatusCount> = sqlx::query_as(
        r#"
        SELECT status, COUNT(*)::BIGINT AS count
        FROM orders
        WHERE tenant_id = $1
        GROUP BY status
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(SalesAnalytics {
        daily_sales,
        order_status_breakdown,
    })
}
