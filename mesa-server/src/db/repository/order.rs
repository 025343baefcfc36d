//! Order Repository
//!
//! Read-side queries over orders and their lines. All lifecycle
//! mutations (activation, item changes, finalization, payment) go
//! through [`crate::orders`] so they stay transactional.

use super::RepoResult;
use shared::models::{Order, OrderDetail, OrderItemDetail, OrderSummary, UndeliveredItem};
use shared::money::format_cents;
use sqlx::SqlitePool;

const ORDER_SELECT: &str =
    "SELECT id, table_id, is_finished, is_paid, created_at, updated_at FROM orders";

const SUMMARY_SELECT: &str = "SELECT o.id, o.table_id, t.name AS table_name, s.name AS section_name, \
     o.is_finished, o.is_paid, \
     COALESCE((SELECT SUM(oi.price_at_order * oi.quantity) FROM order_item oi WHERE oi.order_id = o.id), 0) AS invoice_total, \
     o.created_at, o.updated_at \
     FROM orders o \
     JOIN dining_table t ON t.id = o.table_id \
     LEFT JOIN section s ON s.id = t.section_id";

const ITEM_DETAIL_SELECT: &str = "SELECT oi.id, oi.order_id, oi.menu_item_id, p.name, p.size, p.unit, \
     oi.quantity, oi.price_at_order, oi.price_at_order * oi.quantity AS line_total, \
     oi.is_delivered, oi.created_at, oi.updated_at \
     FROM order_item oi \
     JOIN menu_item mi ON mi.id = oi.menu_item_id \
     JOIN product p ON p.id = mi.product_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
    let sql = format!("{ITEM_DETAIL_SELECT} WHERE oi.order_id = ? ORDER BY oi.created_at, oi.id");
    let items = sqlx::query_as::<_, OrderItemDetail>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

/// Full order detail with both bill variants
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let table_name = sqlx::query_scalar::<_, String>("SELECT name FROM dining_table WHERE id = ?")
        .bind(order.table_id)
        .fetch_one(pool)
        .await?;
    let items = find_items(pool, id).await?;
    let invoice_total = crate::orders::bill::invoice_total(&items);
    let delivered_subtotal = crate::orders::bill::delivered_subtotal(&items);
    Ok(Some(OrderDetail {
        order,
        table_name,
        items,
        invoice_total,
        invoice_total_display: format_cents(invoice_total),
        delivered_subtotal,
        delivered_subtotal_display: format_cents(delivered_subtotal),
    }))
}

/// Open (unfinished) orders, newest first
pub async fn find_open(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let sql = format!("{SUMMARY_SELECT} WHERE o.is_finished = 0 ORDER BY o.created_at DESC");
    let orders = sqlx::query_as::<_, OrderSummary>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

/// Finished orders, newest first
pub async fn find_historical(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let sql = format!("{SUMMARY_SELECT} WHERE o.is_finished = 1 ORDER BY o.updated_at DESC");
    let orders = sqlx::query_as::<_, OrderSummary>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

/// Finished and paid orders, newest first
pub async fn find_paid(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE o.is_finished = 1 AND o.is_paid = 1 ORDER BY o.updated_at DESC"
    );
    let orders = sqlx::query_as::<_, OrderSummary>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

/// Free-text search across table and section names
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<OrderSummary>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{SUMMARY_SELECT} WHERE t.name LIKE ?1 OR s.name LIKE ?1 ORDER BY o.created_at DESC"
    );
    let orders = sqlx::query_as::<_, OrderSummary>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

/// Undelivered lines of open orders, oldest first (kitchen feed)
pub async fn find_undelivered(pool: &SqlitePool) -> RepoResult<Vec<UndeliveredItem>> {
    let items = sqlx::query_as::<_, UndeliveredItem>(
        "SELECT oi.id, oi.order_id, t.name AS table_name, p.name, p.size, p.unit, \
         oi.quantity, oi.created_at \
         FROM order_item oi \
         JOIN orders o ON o.id = oi.order_id \
         JOIN dining_table t ON t.id = o.table_id \
         JOIN menu_item mi ON mi.id = oi.menu_item_id \
         JOIN product p ON p.id = mi.product_id \
         WHERE oi.is_delivered = 0 AND o.is_finished = 0 \
         ORDER BY oi.created_at, oi.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}
