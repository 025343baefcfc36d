//! Reporting/Aggregation
//!
//! Read-only SQL aggregates over finalized orders for the dashboard
//! charts. Buckets use the order's `updated_at` (the finalize time);
//! amounts are integer cents. Recomputed synchronously per request —
//! there is no materialized state to invalidate.

use crate::db::repository::RepoResult;
use serde::Serialize;
use sqlx::SqlitePool;

/// Revenue per calendar day (UTC)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenueByDay {
    pub day: String,
    pub revenue: i64,
}

/// Units sold per product
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QuantityByProduct {
    pub name: String,
    pub size: String,
    pub unit: String,
    pub quantity: i64,
}

/// Finalized order count per hour of day ("00".."23", UTC)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrdersByHour {
    pub hour: String,
    pub orders: i64,
}

/// Revenue per menu category
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenueByCategory {
    pub category: String,
    pub revenue: i64,
}

/// Optional closed-at range in millis; None means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

const RANGE_FILTER: &str =
    "o.is_finished = 1 AND (?1 IS NULL OR o.updated_at >= ?1) AND (?2 IS NULL OR o.updated_at < ?2)";

pub async fn revenue_by_day(pool: &SqlitePool, range: ReportRange) -> RepoResult<Vec<RevenueByDay>> {
    let sql = format!(
        "SELECT strftime('%Y-%m-%d', o.updated_at / 1000, 'unixepoch') AS day, \
         CAST(SUM(oi.price_at_order * oi.quantity) AS INTEGER) AS revenue \
         FROM orders o JOIN order_item oi ON oi.order_id = o.id \
         WHERE {RANGE_FILTER} \
         GROUP BY day ORDER BY day"
    );
    let rows = sqlx::query_as::<_, RevenueByDay>(&sql)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn quantity_by_product(
    pool: &SqlitePool,
    range: ReportRange,
) -> RepoResult<Vec<QuantityByProduct>> {
    let sql = format!(
        "SELECT p.name, p.size, p.unit, CAST(SUM(oi.quantity) AS INTEGER) AS quantity \
         FROM orders o \
         JOIN order_item oi ON oi.order_id = o.id \
         JOIN menu_item mi ON mi.id = oi.menu_item_id \
         JOIN product p ON p.id = mi.product_id \
         WHERE {RANGE_FILTER} \
         GROUP BY p.id ORDER BY quantity DESC, p.name"
    );
    let rows = sqlx::query_as::<_, QuantityByProduct>(&sql)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn orders_by_hour(pool: &SqlitePool, range: ReportRange) -> RepoResult<Vec<OrdersByHour>> {
    let sql = format!(
        "SELECT strftime('%H', o.created_at / 1000, 'unixepoch') AS hour, \
         CAST(COUNT(*) AS INTEGER) AS orders \
         FROM orders o \
         WHERE {RANGE_FILTER} \
         GROUP BY hour ORDER BY hour"
    );
    let rows = sqlx::query_as::<_, OrdersByHour>(&sql)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn revenue_by_category(
    pool: &SqlitePool,
    range: ReportRange,
) -> RepoResult<Vec<RevenueByCategory>> {
    let sql = format!(
        "SELECT COALESCE(mc.name, 'Uncategorized') AS category, \
         CAST(SUM(oi.price_at_order * oi.quantity) AS INTEGER) AS revenue \
         FROM orders o \
         JOIN order_item oi ON oi.order_id = o.id \
         JOIN menu_item mi ON mi.id = oi.menu_item_id \
         LEFT JOIN menu_category mc ON mc.id = mi.category_id \
         WHERE {RANGE_FILTER} \
         GROUP BY category ORDER BY revenue DESC"
    );
    let rows = sqlx::query_as::<_, RevenueByCategory>(&sql)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
