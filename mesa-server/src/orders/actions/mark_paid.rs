//! MarkPaid — record settlement of a finalized order
//!
//! Requires the order to be finalized first (an open tab cannot be
//! settled). Idempotent on an already-paid order.

use super::{ORDER_SELECT, OrderError, OrderResult, fetch_order};
use shared::models::Order;
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn mark_paid(pool: &SqlitePool, order_id: i64) -> OrderResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;
    if !order.is_finished {
        return Err(OrderError::Validation(format!(
            "Order {order_id} must be finalized before it can be marked paid"
        )));
    }
    if order.is_paid {
        tx.commit().await?;
        return Ok(order);
    }

    sqlx::query("UPDATE orders SET is_paid = 1, updated_at = ?1 WHERE id = ?2 AND is_finished = 1")
        .bind(now_millis())
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let updated = sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(order_id, "Order marked paid");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::finalize_order;
    use crate::orders::tests::{open_order, test_pool};

    #[tokio::test]
    async fn paying_an_open_order_is_rejected() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;

        let err = mark_paid(&pool, order.id).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn paying_a_finalized_order_sets_flag_idempotently() {
        let pool = test_pool().await;
        let (_, order) = open_order(&pool, "T1").await;
        finalize_order(&pool, order.id).await.unwrap();

        let paid = mark_paid(&pool, order.id).await.unwrap();
        assert!(paid.is_paid);
        let again = mark_paid(&pool, order.id).await.unwrap();
        assert_eq!(again.updated_at, paid.updated_at);
    }
}
