//! FinalizeOrder — close the tab and free its table
//!
//! The one action that must write two entities together: the order's
//! `is_finished` flag and its table's `in_use` flag flip in the same
//! transaction. A finished order whose table still reads "in use"
//! would block that table forever, so there is no observable state
//! between the two writes.

use super::{ORDER_SELECT, OrderError, OrderResult, fetch_order};
use shared::models::Order;
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn finalize_order(pool: &SqlitePool, order_id: i64) -> OrderResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;

    // Close only if still open (re-check against a racing finalize).
    let closed = sqlx::query(
        "UPDATE orders SET is_finished = 1, updated_at = ?1 WHERE id = ?2 AND is_finished = 0",
    )
    .bind(now_millis())
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if closed.rows_affected() == 0 {
        return Err(OrderError::OrderFinalized(format!(
            "Order {order_id} is already finalized"
        )));
    }

    sqlx::query("UPDATE dining_table SET in_use = 0 WHERE id = ?")
        .bind(order.table_id)
        .execute(&mut *tx)
        .await?;

    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let updated = sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(order_id, table_id = order.table_id, "Order finalized, table freed");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::tests::{assert_occupancy_invariant, open_order, test_pool};

    #[tokio::test]
    async fn finalize_closes_order_and_frees_table() {
        let pool = test_pool().await;
        let (table_id, order) = open_order(&pool, "T1").await;

        let finalized = finalize_order(&pool, order.id).await.unwrap();
        assert!(finalized.is_finished);
        assert!(!finalized.is_paid);

        let in_use = sqlx::query_scalar::<_, bool>("SELECT in_use FROM dining_table WHERE id = ?")
            .bind(table_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!in_use);
        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn finalize_twice_fails_and_changes_nothing() {
        let pool = test_pool().await;
        let (table_id, order) = open_order(&pool, "T1").await;

        let first = finalize_order(&pool, order.id).await.unwrap();
        let err = finalize_order(&pool, order.id).await.unwrap_err();
        assert!(matches!(err, OrderError::OrderFinalized(_)));

        // Second attempt left both entities exactly as the first wrote them.
        let after = crate::db::repository::order::find_by_id(&pool, order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.updated_at, first.updated_at);
        let in_use = sqlx::query_scalar::<_, bool>("SELECT in_use FROM dining_table WHERE id = ?")
            .bind(table_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!in_use);
        assert_occupancy_invariant(&pool).await;
    }
}
