//! AddOrderItem — add a line to an open order
//!
//! Captures the menu item's current price as `price_at_order`; the
//! line is priced by that capture forever after. Rejected uniformly
//! on finalized orders — a closed tab never silently grows.

use super::{OrderError, OrderResult, fetch_open_order};
use shared::models::{MenuItem, OrderItem};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn add_order_item(
    pool: &SqlitePool,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
) -> OrderResult<OrderItem> {
    if quantity < 1 {
        return Err(OrderError::Validation(format!(
            "Quantity must be at least 1, got {quantity}"
        )));
    }

    let mut tx = pool.begin().await?;

    fetch_open_order(&mut tx, order_id).await?;

    // Inactive items are invisible to the ordering flow.
    let menu_item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, product_id, category_id, price, is_active, handle FROM menu_item WHERE id = ?",
    )
    .bind(menu_item_id)
    .fetch_optional(&mut *tx)
    .await?
    .filter(|mi| mi.is_active)
    .ok_or_else(|| {
        OrderError::NotFound(format!("Menu item {menu_item_id} not found or inactive"))
    })?;

    let item_id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, quantity, price_at_order, is_delivered, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
    )
    .bind(item_id)
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(menu_item.price)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let item = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, quantity, price_at_order, is_delivered, created_at, updated_at FROM order_item WHERE id = ?",
    )
    .bind(item_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        item_id,
        menu_item_id,
        quantity,
        price_at_order = menu_item.price,
        "Order item added"
    );
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::tests::{open_order, seed_menu_item, test_pool};

    #[tokio::test]
    async fn captured_price_survives_menu_price_edit() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        let menu_item_id = seed_menu_item(&pool, "Burger", 950).await;

        let item = add_order_item(&pool, order.id, menu_item_id, 2).await.unwrap();
        assert_eq!(item.price_at_order, 950);

        // Price edit after the fact must not touch the captured line.
        sqlx::query("UPDATE menu_item SET price = 1200 WHERE id = ?")
            .bind(menu_item_id)
            .execute(&pool)
            .await
            .unwrap();

        let items = crate::db::repository::order::find_items(&pool, order.id).await.unwrap();
        assert_eq!(items[0].price_at_order, 950);
        assert_eq!(items[0].line_total, 1900);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        let menu_item_id = seed_menu_item(&pool, "Burger", 950).await;

        let err = add_order_item(&pool, order.id, menu_item_id, 0).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn inactive_menu_item_is_not_found() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        let menu_item_id = seed_menu_item(&pool, "Burger", 950).await;
        sqlx::query("UPDATE menu_item SET is_active = 0 WHERE id = ?")
            .bind(menu_item_id)
            .execute(&pool)
            .await
            .unwrap();

        let err = add_order_item(&pool, order.id, menu_item_id, 1).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }
}
