//! Lifecycle actions
//!
//! One module per staff command. Each action is a free async function
//! over the pool that opens its own transaction, validates, mutates,
//! and commits — callers never compose these inside a larger
//! transaction.

mod activate_table;
mod add_item;
mod bulk_finalize;
mod deliver_item;
mod finalize_order;
mod mark_paid;
mod remove_item;
mod switch_table;

pub use activate_table::activate_table;
pub use add_item::add_order_item;
pub use bulk_finalize::bulk_finalize_open_orders;
pub use deliver_item::deliver_order_item;
pub use finalize_order::finalize_order;
pub use mark_paid::mark_paid;
pub use remove_item::delete_order_item;
pub use switch_table::switch_table;

use super::error::{OrderError, OrderResult};
use shared::models::Order;
use sqlx::{Sqlite, Transaction};

const ORDER_SELECT: &str =
    "SELECT id, table_id, is_finished, is_paid, created_at, updated_at FROM orders";

/// Fetch an order inside the action's transaction, or NotFound.
pub(crate) async fn fetch_order(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
) -> OrderResult<Order> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    sqlx::query_as::<_, Order>(&sql)
        .bind(order_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} not found")))
}

/// Fetch an order and reject if it is already finalized.
pub(crate) async fn fetch_open_order(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
) -> OrderResult<Order> {
    let order = fetch_order(tx, order_id).await?;
    if order.is_finished {
        return Err(OrderError::OrderFinalized(format!(
            "Order {order_id} is finalized"
        )));
    }
    Ok(order)
}
