//! Order Lifecycle Engine
//!
//! Owns every mutation of orders, order lines and table occupancy.
//! States: OPEN → FINISHED_UNPAID → FINISHED_PAID; finalization is
//! terminal for line mutation and frees the table.
//!
//! # Transaction discipline
//!
//! Every action runs inside a single SQLite transaction and re-checks
//! entity state *inside* that transaction before writing (guarded
//! `UPDATE ... WHERE` with a rows_affected check), so two staff
//! terminals racing on the same table or order cannot both win. An
//! error path drops the transaction and rolls back everything; no
//! action leaves a half-applied state behind.
//!
//! Occupancy invariant maintained here and nowhere else:
//! `dining_table.in_use = 1` iff an order with `is_finished = 0`
//! references that table.

pub mod actions;
pub mod bill;
mod error;

pub use actions::{
    activate_table, add_order_item, bulk_finalize_open_orders, delete_order_item,
    deliver_order_item, finalize_order, mark_paid, switch_table,
};
pub use error::{OrderError, OrderResult};

#[cfg(test)]
pub(crate) mod tests;
