//! Order database operations
//!
//! ## Placement transaction
//!
//! `place_order` is the only multi-table write path in the platform:
//! it validates every line item against the live product row, snapshots the
//! items, decrements inventory, and bumps the customer aggregates — all
//! inside one transaction. Product and customer rows are read with
//! `FOR UPDATE`, so two concurrent placements against the same product
//! serialize at the storage layer; the inventory decrement is additionally
//! guarded by `inventory >= quantity` in its WHERE clause. An early return
//! at any step drops the transaction, which rolls every write back.
//!
//! `cancel_order` is the inverse: legal only before shipment, restores
//! inventory and sales counts under the same row locks, exactly once.

use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;

use super::customers::Customer;
use crate::error::ServiceResult;
use crate::util::{generate_order_number, now_millis, start_of_day_millis, start_of_month_millis};

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    pub customer_id: String,
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub shipping_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub currency: String,
    pub billing_address: serde_json::Value,
    pub shipping_address: serde_json::Value,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_sku: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: i64,
}

/// Fully hydrated order for confirmation/detail display
#[derive(Debug, serde::Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
}

/// Order row joined with basic customer identity, for list views
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: String,
    pub customer_id: String,
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub total_amount: Decimal,
    pub currency: String,
    pub created_at: i64,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
}

// ── Placement input ──

#[derive(Debug, serde::Deserialize)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, serde::Deserialize)]
pub struct OrderCreate {
    pub customer_id: String,
    pub items: Vec<OrderItemInput>,
    pub billing_address: serde_json::Value,
    pub shipping_address: serde_json::Value,
    pub payment_method: String,
    pub tax_amount: Option<Decimal>,
    pub shipping_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Product fields the placement transaction reads under lock
#[derive(Debug, sqlx::FromRow)]
struct LockedProduct {
    id: String,
    name: String,
    sku: String,
    images: Vec<String>,
    price: Decimal,
    status: String,
    track_inventory: bool,
    inventory: i32,
}

/// Immutable line item snapshot computed from a locked product row
#[derive(Debug, PartialEq)]
struct LineSnapshot {
    product_id: String,
    product_name: String,
    product_sku: String,
    product_image: Option<String>,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
}

/// Validate one line item and build its snapshot.
///
/// Checks run in the same order as the error contract: existence is handled
/// by the caller, then availability, then inventory.
fn line_snapshot(product: &LockedProduct, quantity: i32) -> Result<LineSnapshot, AppError> {
    if product.status != "active" {
        return Err(AppError::with_message(
            ErrorCode::ProductUnavailable,
            format!("Product {} is not available", product.name),
        ));
    }

    if product.track_inventory && product.inventory < quantity {
        return Err(AppError::with_message(
            ErrorCode::InsufficientInventory,
            format!(
                "Insufficient inventory for {}. Available: {}",
                product.name, product.inventory
            ),
        )
        .with_detail("product_id", product.id.clone()));
    }

    let unit_price = product.price;
    Ok(LineSnapshot {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        product_sku: product.sku.clone(),
        product_image: product.images.first().cloned(),
        quantity,
        unit_price,
        total_price: unit_price * Decimal::from(quantity),
    })
}

/// `total = subtotal + tax + shipping - discount`, absent amounts count as zero.
fn order_total(
    subtotal: Decimal,
    tax: Option<Decimal>,
    shipping: Option<Decimal>,
    discount: Option<Decimal>,
) -> Decimal {
    subtotal + tax.unwrap_or(Decimal::ZERO) + shipping.unwrap_or(Decimal::ZERO)
        - discount.unwrap_or(Decimal::ZERO)
}

// ── Placement ──

pub async fn place_order(
    pool: &PgPool,
    tenant_id: &str,
    data: &OrderCreate,
) -> ServiceResult<OrderDetail> {
    if data.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).into());
    }
    for item in &data.items {
        if item.quantity < 1 {
            return Err(AppError::new(ErrorCode::InvalidQuantity)
                .with_detail("product_id", item.product_id.clone())
                .into());
        }
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Lock the customer row up front; the aggregate update at the end
    // writes to it.
    let customer: Option<Customer> =
        sqlx::query_as("SELECT * FROM customers WHERE id = $1 AND tenant_id = $2 FOR UPDATE")
            .bind(&data.customer_id)
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?;
    let customer = customer
        .ok_or_else(|| AppError::with_message(ErrorCode::CustomerNotFound, "Invalid customer"))?;

    let mut subtotal = Decimal::ZERO;
    let mut lines = Vec::with_capacity(data.items.len());

    for item in &data.items {
        // The tenant filter makes another tenant's product indistinguishable
        // from a missing one.
        let product: Option<LockedProduct> = sqlx::query_as(
            r#"
            SELECT id, name, sku, images, price, status, track_inventory, inventory
            FROM products
            WHERE id = $1 AND tenant_id = $2
            FOR UPDATE
            "#,
        )
        .bind(&item.product_id)
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let product = product.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", item.product_id),
            )
        })?;

        let line = line_snapshot(&product, item.quantity)?;
        subtotal += line.total_price;

        if product.track_inventory {
            // The row is locked, so the guard cannot race; it still stays in
            // the WHERE clause as the invariant of record.
            let result = sqlx::query(
                r#"
                UPDATE products
                SET inventory = inventory - $1, sales_count = sales_count + $1, updated_at = $2
                WHERE id = $3 AND inventory >= $1
                "#,
            )
            .bind(item.quantity)
            .bind(now)
            .bind(&product.id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::with_message(
                    ErrorCode::InsufficientInventory,
                    format!(
                        "Insufficient inventory for {}. Available: {}",
                        product.name, product.inventory
                    ),
                )
                .into());
            }
        }

        lines.push(line);
    }

    let total_amount = order_total(
        subtotal,
        data.tax_amount,
        data.shipping_amount,
        data.discount_amount,
    );

    let order_id = super::new_id();
    let order_number = generate_order_number();

    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (id, tenant_id, customer_id, order_number, status, payment_status,
                            payment_method, subtotal, tax_amount, shipping_amount,
                            discount_amount, total_amount, currency, billing_address,
                            shipping_address, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'pending', 'pending',
                $5, $6, $7, $8, $9, $10, 'USD', $11, $12, $13, $14, $14)
        RETURNING *
        "#,
    )
    .bind(&order_id)
    .bind(tenant_id)
    .bind(&data.customer_id)
    .bind(&order_number)
    .bind(&data.payment_method)
    .bind(subtotal)
    .bind(data.tax_amount.unwrap_or(Decimal::ZERO))
    .bind(data.shipping_amount.unwrap_or(Decimal::ZERO))
    .bind(data.discount_amount.unwrap_or(Decimal::ZERO))
    .bind(total_amount)
    .bind(&data.billing_address)
    .bind(&data.shipping_address)
    .bind(&data.notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let item_ids: Vec<String> = lines.iter().map(|_| super::new_id()).collect();
    let order_ids: Vec<String> = lines.iter().map(|_| order_id.clone()).collect();
    let product_ids: Vec<String> = lines.iter().map(|l| l.product_id.clone()).collect();
    let names: Vec<String> = lines.iter().map(|l| l.product_name.clone()).collect();
    let skus: Vec<String> = lines.iter().map(|l| l.product_sku.clone()).collect();
    let images: Vec<Option<String>> = lines.iter().map(|l| l.product_image.clone()).collect();
    let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();
    let unit_prices: Vec<Decimal> = lines.iter().map(|l| l.unit_price).collect();
    let total_prices: Vec<Decimal> = lines.iter().map(|l| l.total_price).collect();
    let created_ats: Vec<i64> = lines.iter().map(|_| now).collect();
    sqlx::query(
        r#"
        INSERT INTO order_items (id, order_id, product_id, product_name, product_sku,
                                 product_image, quantity, unit_price, total_price, created_at)
        SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[],
                             $6::text[], $7::integer[], $8::numeric[], $9::numeric[], $10::bigint[])
        "#,
    )
    .bind(&item_ids)
    .bind(&order_ids)
    .bind(&product_ids)
    .bind(&names)
    .bind(&skus)
    .bind(&images)
    .bind(&quantities)
    .bind(&unit_prices)
    .bind(&total_prices)
    .bind(&created_ats)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE customers
        SET total_orders = total_orders + 1,
            total_spent = total_spent + $1,
            last_order_at = $2,
            updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(total_amount)
    .bind(now)
    .bind(&customer.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        order_number = %order.order_number,
        total = %order.total_amount,
        "Order placed"
    );

    get_detail(pool, tenant_id, &order.id)
        .await?
        .ok_or_else(|| AppError::internal("Order vanished after commit").into())
}

// ── Cancellation ──

/// Cancel an order, restoring inventory and sales counts.
///
/// Only legal from pending/processing. Product rows are re-read `FOR UPDATE`
/// so a placement running concurrently against the same products serializes
/// with the restore.
pub async fn cancel_order(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
) -> ServiceResult<Order> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND tenant_id = $2 FOR UPDATE")
            .bind(order_id)
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?;
    let order = order.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let status = OrderStatus::from_db(&order.status)
        .ok_or_else(|| AppError::internal(format!("Unknown order status: {}", order.status)))?;
    if !status.can_cancel() {
        return Err(AppError::new(ErrorCode::OrderNotCancellable).into());
    }

    let items: Vec<OrderItem> = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

    for item in &items {
        // Product may have been deleted since the order was placed.
        let product: Option<(String, bool)> = sqlx::query_as(
            "SELECT id, track_inventory FROM products WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
        .bind(&item.product_id)
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((product_id, track_inventory)) = product
            && track_inventory
        {
            sqlx::query(
                r#"
                UPDATE products
                SET inventory = inventory + $1,
                    sales_count = GREATEST(0, sales_count - $1),
                    updated_at = $2
                WHERE id = $3
                "#,
            )
            .bind(item.quantity)
            .bind(now)
            .bind(&product_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    let cancelled: Order = sqlx::query_as(
        "UPDATE orders SET status = 'cancelled', updated_at = $1 WHERE id = $2 RETURNING *",
    )
    .bind(now)
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_number = %cancelled.order_number, "Order cancelled");

    Ok(cancelled)
}

// ── Status transitions ──

/// Move an order along the fulfilment state machine.
///
/// Cancellation is rejected here; it has its own operation with inventory
/// restoration.
pub async fn update_status(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
    target: OrderStatus,
    tracking_number: Option<&str>,
) -> ServiceResult<Order> {
    if target == OrderStatus::Cancelled {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            "Use the cancel operation to cancel an order",
        )
        .into());
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND tenant_id = $2 FOR UPDATE")
            .bind(order_id)
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?;
    let order = order.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let current = OrderStatus::from_db(&order.status)
        .ok_or_else(|| AppError::internal(format!("Unknown order status: {}", order.status)))?;
    if !current.can_transition_to(target) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Cannot transition order from {} to {}",
                current.as_db(),
                target.as_db()
            ),
        )
        .into());
    }

    let shipped_at = (target == OrderStatus::Shipped).then_some(now);
    let delivered_at = (target == OrderStatus::Delivered).then_some(now);

    let updated: Order = sqlx::query_as(
        r#"
        UPDATE orders SET
            status = $1,
            tracking_number = COALESCE($2, tracking_number),
            shipped_at = COALESCE($3, shipped_at),
            delivered_at = COALESCE($4, delivered_at),
            updated_at = $5
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(target.as_db())
    .bind(tracking_number)
    .bind(shipped_at)
    .bind(delivered_at)
    .bind(now)
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(updated)
}

// ── Reads ──

pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    status: Option<&str>,
    payment_status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<OrderSummary>, u64), sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM orders
        WHERE tenant_id = $1
            AND ($2::TEXT IS NULL OR status = $2)
            AND ($3::TEXT IS NULL OR payment_status = $3)
        "#,
    )
    .bind(tenant_id)
    .bind(status)
    .bind(payment_status)
    .fetch_one(pool)
    .await?;

    let rows: Vec<OrderSummary> = sqlx::query_as(
        r#"
        SELECT o.id, o.customer_id, o.order_number, o.status, o.payment_status,
               o.total_amount, o.currency, o.created_at,
               c.first_name AS customer_first_name,
               c.last_name AS customer_last_name,
               c.email AS customer_email
        FROM orders o
        JOIN customers c ON c.id = o.customer_id
        WHERE o.tenant_id = $1
            AND ($2::TEXT IS NULL OR o.status = $2)
            AND ($3::TEXT IS NULL OR o.payment_status = $3)
        ORDER BY o.created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(tenant_id)
    .bind(status)
    .bind(payment_status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total as u64))
}

pub async fn get_detail(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
) -> Result<Option<OrderDetail>, sqlx::Error> {
    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND tenant_id = $2")
            .bind(order_id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await?;
    let Some(order) = order else {
        return Ok(None);
    };

    let items: Vec<OrderItem> =
        sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY created_at, id")
            .bind(order_id)
            .fetch_all(pool)
            .await?;

    let customer: Customer =
        sqlx::query_as("SELECT * FROM customers WHERE id = $1 AND tenant_id = $2")
            .bind(&order.customer_id)
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;

    Ok(Some(OrderDetail {
        order,
        items,
        customer,
    }))
}

/// Recent orders for a customer detail view
pub async fn list_recent_for_customer(
    pool: &PgPool,
    tenant_id: &str,
    customer_id: &str,
    limit: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM orders
        WHERE tenant_id = $1 AND customer_id = $2
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(tenant_id)
    .bind(customer_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

// ── Stats ──

#[derive(Debug, serde::Serialize)]
pub struct OrderCounts {
    pub total: i64,
    pub monthly: i64,
    pub daily: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct RevenueSums {
    pub total: Decimal,
    pub monthly: Decimal,
    pub daily: Decimal,
}

#[derive(Debug, serde::Serialize)]
pub struct OrderStats {
    pub orders: OrderCounts,
    pub revenue: RevenueSums,
}

/// Tenant-scoped order counts and paid revenue over total/month/day windows.
pub async fn stats(pool: &PgPool, tenant_id: &str) -> Result<OrderStats, sqlx::Error> {
    let month_start = start_of_month_millis();
    let day_start = start_of_day_millis();

    let (total, monthly, daily): (i64, i64, i64) = sqlx::query_as(
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
    .bind(day_start)
    .fetch_one(pool)
    .await?;

    let (revenue_total, revenue_monthly, revenue_daily): (Decimal, Decimal, Decimal) =
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
        .bind(day_start)
        .fetch_one(pool)
        .await?;

    Ok(OrderStats {
        orders: OrderCounts {
            total,
            monthly,
            daily,
        },
        revenue: RevenueSums {
            total: revenue_total,
            monthly: revenue_monthly,
            daily: revenue_daily,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(inventory: i32, track: bool, status: &str) -> LockedProduct {
        LockedProduct {
            id: "p1".into(),
            name: "Widget".into(),
            sku: "WID-001".into(),
            images: vec!["a.jpg".into(), "b.jpg".into()],
            price: Decimal::new(1000, 2), // 10.00
            status: status.into(),
            track_inventory: track,
            inventory,
        }
    }

    #[test]
    fn test_snapshot_captures_product_state() {
        // Scenario A math: inventory 5, quantity 3, price 10.00
        let line = line_snapshot(&product(5, true, "active"), 3).unwrap();
        assert_eq!(line.product_name, "Widget");
        assert_eq!(line.product_sku, "WID-001");
        assert_eq!(line.product_image.as_deref(), Some("a.jpg"));
        assert_eq!(line.unit_price, Decimal::new(1000, 2));
        assert_eq!(line.total_price, Decimal::new(3000, 2)); // 30.00
    }

    #[test]
    fn test_snapshot_image_none_when_no_images() {
        let mut p = product(5, true, "active");
        p.images.clear();
        let line = line_snapshot(&p, 1).unwrap();
        assert_eq!(line.product_image, None);
    }

    #[test]
    fn test_inactive_product_rejected() {
        for status in ["draft", "archived"] {
            let err = line_snapshot(&product(5, true, status), 1).unwrap_err();
            assert_eq!(err.code, ErrorCode::ProductUnavailable);
            assert_eq!(err.message, "Product Widget is not available");
        }
    }

    #[test]
    fn test_insufficient_inventory_rejected() {
        // Scenario B: inventory 2, quantity 3
        let err = line_snapshot(&product(2, true, "active"), 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientInventory);
        assert_eq!(err.message, "Insufficient inventory for Widget. Available: 2");
    }

    #[test]
    fn test_exact_inventory_accepted() {
        let line = line_snapshot(&product(3, true, "active"), 3).unwrap();
        assert_eq!(line.quantity, 3);
    }

    #[test]
    fn test_untracked_inventory_ignores_stock() {
        let line = line_snapshot(&product(0, false, "active"), 10).unwrap();
        assert_eq!(line.total_price, Decimal::new(10000, 2)); // 100.00
    }

    #[test]
    fn test_order_total_conservation() {
        let subtotal = Decimal::new(3000, 2); // 30.00
        let total = order_total(
            subtotal,
            Some(Decimal::new(250, 2)),  // 2.50 tax
            Some(Decimal::new(500, 2)),  // 5.00 shipping
            Some(Decimal::new(1000, 2)), // 10.00 discount
        );
        assert_eq!(total, Decimal::new(2750, 2)); // 27.50
    }

    #[test]
    fn test_order_total_defaults_to_subtotal() {
        let subtotal = Decimal::new(3000, 2);
        assert_eq!(order_total(subtotal, None, None, None), subtotal);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let p = product(100, true, "active");
        let quantities = [1, 4, 7];
        let subtotal: Decimal = quantities
            .iter()
            .map(|&q| line_snapshot(&p, q).unwrap().total_price)
            .sum();
        assert_eq!(subtotal, Decimal::new(12000, 2)); // 12 units * 10.00
    }
}
