//! SwitchTable — move an open order to another table
//!
//! Three writes in one transaction: claim the new table, free the old
//! one, repoint the order. The new table's claim is a guarded UPDATE,
//! so moving onto an occupied table is rejected instead of silently
//! double-booking it; a partial failure rolls everything back, never
//! leaving both tables occupied or both free.

use super::{ORDER_SELECT, OrderError, OrderResult, fetch_open_order};
use shared::models::Order;
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn switch_table(
    pool: &SqlitePool,
    order_id: i64,
    new_table_id: i64,
) -> OrderResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_open_order(&mut tx, order_id).await?;

    if order.table_id == new_table_id {
        // Moving onto the table the order already occupies: no-op.
        tx.commit().await?;
        return Ok(order);
    }

    let new_table_name = sqlx::query_scalar::<_, String>(
        "SELECT name FROM dining_table WHERE id = ?",
    )
    .bind(new_table_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| OrderError::NotFound(format!("Table {new_table_id} not found")))?;

    let claimed = sqlx::query("UPDATE dining_table SET in_use = 1 WHERE id = ? AND in_use = 0")
        .bind(new_table_id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Err(OrderError::TableOccupied(format!(
            "Table '{}' is already in use",
            new_table_name
        )));
    }

    sqlx::query("UPDATE dining_table SET in_use = 0 WHERE id = ?")
        .bind(order.table_id)
        .execute(&mut *tx)
        .await?;

    // Repoint only while still open (guards a racing finalize).
    let moved = sqlx::query(
        "UPDATE orders SET table_id = ?1, updated_at = ?2 WHERE id = ?3 AND is_finished = 0",
    )
    .bind(new_table_id)
    .bind(now_millis())
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if moved.rows_affected() == 0 {
        return Err(OrderError::OrderFinalized(format!(
            "Order {order_id} is finalized"
        )));
    }

    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let updated = sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        old_table_id = order.table_id,
        new_table_id,
        "Order moved to another table"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::activate_table;
    use crate::orders::tests::{assert_occupancy_invariant, open_order, seed_table, test_pool};

    #[tokio::test]
    async fn switch_frees_old_table_and_claims_new() {
        let pool = test_pool().await;
        let (old_table, order) = open_order(&pool, "T1").await;
        let new_table = seed_table(&pool, "T2", None).await;

        let moved = switch_table(&pool, order.id, new_table).await.unwrap();
        assert_eq!(moved.table_id, new_table);

        let old_in_use = sqlx::query_scalar::<_, bool>("SELECT in_use FROM dining_table WHERE id = ?")
            .bind(old_table)
            .fetch_one(&pool)
            .await
            .unwrap();
        let new_in_use = sqlx::query_scalar::<_, bool>("SELECT in_use FROM dining_table WHERE id = ?")
            .bind(new_table)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!old_in_use);
        assert!(new_in_use);
        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn switch_onto_occupied_table_is_rejected_atomically() {
        let pool = test_pool().await;
        let (old_table, order) = open_order(&pool, "T1").await;
        let busy_table = seed_table(&pool, "T2", None).await;
        activate_table(&pool, busy_table).await.unwrap();

        let err = switch_table(&pool, order.id, busy_table).await.unwrap_err();
        assert!(matches!(err, OrderError::TableOccupied(_)));

        // Nothing moved: the order still occupies its original table.
        let after = crate::db::repository::order::find_by_id(&pool, order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.table_id, old_table);
        assert_occupancy_invariant(&pool).await;
    }

    #[tokio::test]
    async fn switch_to_own_table_is_a_noop() {
        let pool = test_pool().await;
        let (table_id, order) = open_order(&pool, "T1").await;

        let same = switch_table(&pool, order.id, table_id).await.unwrap();
        assert_eq!(same.table_id, table_id);
        assert_occupancy_invariant(&pool).await;
    }
}
