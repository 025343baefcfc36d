//! ActivateTable — open a tab against a free table
//!
//! Atomically claims the table (`in_use` 0 → 1) and creates the new
//! open order. The claim is a guarded UPDATE re-checked inside the
//! transaction, so of two concurrent activations on the same table
//! exactly one wins; the loser gets `TableOccupied` and no second
//! order ever exists.

use super::{ORDER_SELECT, OrderError, OrderResult};
use shared::models::{DiningTable, Order};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn activate_table(pool: &SqlitePool, table_id: i64) -> OrderResult<Order> {
    let mut tx = pool.begin().await?;

    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, name, section_id, in_use, description FROM dining_table WHERE id = ?",
    )
    .bind(table_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| OrderError::NotFound(format!("Table {table_id} not found")))?;

    // Claim the table; loses against a concurrent activation.
    let claimed = sqlx::query("UPDATE dining_table SET in_use = 1 WHERE id = ? AND in_use = 0")
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Err(OrderError::TableOccupied(format!(
            "Table '{}' is already in use",
            table.name
        )));
    }

    let order_id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO orders (id, table_id, is_finished, is_paid, created_at, updated_at) VALUES (?1, ?2, 0, 0, ?3, ?3)",
    )
    .bind(order_id)
    .bind(table_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        table_id,
        table_name = %table.name,
        "Table activated, order opened"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::tests::{assert_occupancy_invariant, seed_table, test_pool};

    #[tokio::test]
    async fn activate_claims_table_and_opens_order() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, "T1", None).await;

        let order = activate_table(&pool, table_id).await.unwrap();
        assert_eq!(order.table_id, table_id);
        assert!(!order.is_finished);
        assert!(!order.is_paid);

        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn activate_on_occupied_table_conflicts_without_second_order() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, "T1", None).await;

        activate_table(&pool, table_id).await.unwrap();
        let err = activate_table(&pool, table_id).await.unwrap_err();
        assert!(matches!(err, OrderError::TableOccupied(_)));

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE table_id = ?")
            .bind(table_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn activate_on_missing_table_is_not_found() {
        let pool = test_pool().await;
        let err = activate_table(&pool, 424242).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_activations_let_exactly_one_win() {
        let pool = test_pool().await;
        let table_id = seed_table(&pool, "T1", None).await;

        let (a, b) = tokio::join!(activate_table(&pool, table_id), activate_table(&pool, table_id));

        let wins = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(loser, Err(OrderError::TableOccupied(_))));
        assert_occupancy_invariant(&pool).await;
    }
}
