//! Order Models
//!
//! An order is a tab opened against one table. It progresses
//! OPEN → FINISHED_UNPAID → FINISHED_PAID; finalization is terminal
//! for line-item mutation and frees the table.

use serde::{Deserialize, Serialize};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub is_finished: bool,
    pub is_paid: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line entity
///
/// `price_at_order` is captured from the menu item when the line is
/// created and authoritative thereafter: later price edits never
/// change a historical bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Unit price in cents, captured at creation
    pub price_at_order: i64,
    pub is_delivered: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line joined with product info, for detail views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub size: String,
    pub unit: String,
    pub quantity: i64,
    /// Unit price in cents, captured at creation
    pub price_at_order: i64,
    /// price_at_order * quantity, in cents
    pub line_total: i64,
    pub is_delivered: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order with table context and invoice total, for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub table_id: i64,
    pub table_name: String,
    pub section_name: Option<String>,
    pub is_finished: bool,
    pub is_paid: bool,
    /// Sum over all lines of price_at_order * quantity, in cents
    pub invoice_total: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Full order detail: lines plus both bill variants
///
/// `invoice_total` sums every line (what the customer owes);
/// `delivered_subtotal` sums delivered lines only (floor view).
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub table_name: String,
    pub items: Vec<OrderItemDetail>,
    pub invoice_total: i64,
    pub invoice_total_display: String,
    pub delivered_subtotal: i64,
    pub delivered_subtotal_display: String,
}

/// Undelivered line of an open order, for the kitchen/floor feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UndeliveredItem {
    pub id: i64,
    pub order_id: i64,
    pub table_name: String,
    pub name: String,
    pub size: String,
    pub unit: String,
    pub quantity: i64,
    pub created_at: i64,
}

/// Dashboard feed: open orders plus their undelivered lines
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFeed {
    pub active_orders: Vec<OrderSummary>,
    pub undelivered_items: Vec<UndeliveredItem>,
}
