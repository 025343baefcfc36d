//! Engine test helpers and end-to-end flow tests
//!
//! Per-action edge cases live next to each action; this module holds
//! the shared fixtures and the multi-step flows.

mod test_flows;

use crate::db::DbService;
use crate::orders::activate_table;
use shared::models::Order;
use shared::util::snowflake_id;
use sqlx::SqlitePool;

/// Fresh in-memory database with migrations applied
pub(crate) async fn test_pool() -> SqlitePool {
    DbService::new_in_memory().await.unwrap().pool
}

pub(crate) async fn seed_table(pool: &SqlitePool, name: &str, section_id: Option<i64>) -> i64 {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, name, section_id, in_use, description) VALUES (?1, ?2, ?3, 0, NULL)",
    )
    .bind(id)
    .bind(name)
    .bind(section_id)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Product + active menu item priced in cents; returns the menu item id
pub(crate) async fn seed_menu_item(pool: &SqlitePool, name: &str, price: i64) -> i64 {
    let product_id = snowflake_id();
    let handle = shared::util::slugify(&format!("{name} 33cl bottle {product_id}"));
    sqlx::query(
        "INSERT INTO product (id, name, size, unit, description, image, handle) VALUES (?1, ?2, '33cl', 'bottle', NULL, NULL, ?3)",
    )
    .bind(product_id)
    .bind(name)
    .bind(&handle)
    .execute(pool)
    .await
    .unwrap();

    let menu_item_id = snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, product_id, category_id, price, is_active, handle) VALUES (?1, ?2, NULL, ?3, 1, ?4)",
    )
    .bind(menu_item_id)
    .bind(product_id)
    .bind(price)
    .bind(&handle)
    .execute(pool)
    .await
    .unwrap();
    menu_item_id
}

/// Seed a table and open an order against it
pub(crate) async fn open_order(pool: &SqlitePool, table_name: &str) -> (i64, Order) {
    let table_id = seed_table(pool, table_name, None).await;
    let order = activate_table(pool, table_id).await.unwrap();
    (table_id, order)
}

/// For every table: `in_use` iff an open order references it.
pub(crate) async fn assert_occupancy_invariant(pool: &SqlitePool) {
    let violations = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_table t \
         WHERE t.in_use <> EXISTS (SELECT 1 FROM orders o WHERE o.table_id = t.id AND o.is_finished = 0)",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(violations, 0, "table occupancy diverged from open orders");
}
