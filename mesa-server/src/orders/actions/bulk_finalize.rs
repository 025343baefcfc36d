//! BulkFinalizeOpenOrders — end-of-day close-out
//!
//! Finalizes every open order, each in its own transaction; one
//! failure is logged and skipped, the rest still close. Returns the
//! number of orders actually finalized.

use super::{OrderResult, finalize_order::finalize_order};
use sqlx::SqlitePool;

pub async fn bulk_finalize_open_orders(pool: &SqlitePool) -> OrderResult<u64> {
    let open_ids = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM orders WHERE is_finished = 0 ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
    .map_err(crate::orders::OrderError::from)?;

    let mut finalized = 0u64;
    for order_id in open_ids {
        match finalize_order(pool, order_id).await {
            Ok(_) => finalized += 1,
            Err(e) => {
                // Each order is an independent unit of work.
                tracing::warn!(order_id, error = %e, "Bulk finalize skipped an order");
            }
        }
    }

    tracing::info!(finalized, "Bulk finalize completed");
    Ok(finalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::tests::{assert_occupancy_invariant, open_order, test_pool};

    #[tokio::test]
    async fn closes_every_open_order_and_frees_tables() {
        let pool = test_pool().await;
        open_order(&pool, "T1").await;
        open_order(&pool, "T2").await;
        let (_, already_closed) = open_order(&pool, "T3").await;
        crate::orders::finalize_order(&pool, already_closed.id).await.unwrap();

        let count = bulk_finalize_open_orders(&pool).await.unwrap();
        assert_eq!(count, 2);

        let open = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE is_finished = 0")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(open, 0);
        let busy = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_table WHERE in_use = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(busy, 0);
        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn empty_close_out_finalizes_nothing() {
        let pool = test_pool().await;
        let count = bulk_finalize_open_orders(&pool).await.unwrap();
        assert_eq!(count, 0);
    }
}
