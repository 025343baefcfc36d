//! DeleteOrderItem — remove a line from an open order
//!
//! Hard delete, no soft-delete. Carries the same finalized-order
//! guard as AddOrderItem: a closed tab never shrinks either.

use super::{OrderError, OrderResult, fetch_open_order};
use sqlx::SqlitePool;

pub async fn delete_order_item(pool: &SqlitePool, item_id: i64) -> OrderResult<()> {
    let mut tx = pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, i64>("SELECT order_id FROM order_item WHERE id = ?")
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| OrderError::NotFound(format!("Order item {item_id} not found")))?;

    fetch_open_order(&mut tx, order_id).await?;

    sqlx::query("DELETE FROM order_item WHERE id = ?")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(order_id, item_id, "Order item removed");
    Ok(())
}
