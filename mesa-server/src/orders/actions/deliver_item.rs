//! DeliverOrderItem — mark a line delivered
//!
//! Idempotent: delivering a delivered line succeeds and changes
//! nothing. Rejected on finalized orders.

use super::{OrderError, OrderResult};
use shared::models::OrderItem;
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn deliver_order_item(pool: &SqlitePool, item_id: i64) -> OrderResult<OrderItem> {
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, quantity, price_at_order, is_delivered, created_at, updated_at FROM order_item WHERE id = ?",
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| OrderError::NotFound(format!("Order item {item_id} not found")))?;

    super::fetch_open_order(&mut tx, item.order_id).await?;

    if item.is_delivered {
        // Already delivered: nothing to write.
        tx.commit().await?;
        return Ok(item);
    }

    let now = now_millis();
    sqlx::query("UPDATE order_item SET is_delivered = 1, updated_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    let updated = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, quantity, price_at_order, is_delivered, created_at, updated_at FROM order_item WHERE id = ?",
    )
    .bind(item_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = item.order_id, item_id, "Order item delivered");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::tests::{open_order, seed_menu_item, test_pool};
    use crate::orders::{add_order_item, finalize_order};

    #[tokio::test]
    async fn deliver_is_idempotent() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        let menu_item_id = seed_menu_item(&pool, "Burger", 950).await;
        let item = add_order_item(&pool, order.id, menu_item_id, 1).await.unwrap();

        let first = deliver_order_item(&pool, item.id).await.unwrap();
        assert!(first.is_delivered);
        let second = deliver_order_item(&pool, item.id).await.unwrap();
        assert!(second.is_delivered);
        assert_eq!(first.updated_at, second.updated_at);
    }

    #[tokio::test]
    async fn deliver_against_finalized_order_is_rejected() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        let menu_item_id = seed_menu_item(&pool, "Burger", 950).await;
        let item = add_order_item(&pool, order.id, menu_item_id, 1).await.unwrap();

        finalize_order(&pool, order.id).await.unwrap();

        let err = deliver_order_item(&pool, item.id).await.unwrap_err();
        assert!(matches!(err, OrderError::OrderFinalized(_)));
    }
}
