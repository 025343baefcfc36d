//! Bill computation
//!
//! Two bill variants over the same captured prices:
//! - invoice total: every line, what the customer owes at checkout
//! - delivered subtotal: delivered lines only, the floor view
//!
//! Lines multiply `price_at_order` (not the live menu price), so a
//! later price edit never changes a historical bill.

use shared::models::OrderItemDetail;

/// Sum of price_at_order * quantity over all lines, in cents
pub fn invoice_total(items: &[OrderItemDetail]) -> i64 {
    items.iter().map(|i| i.price_at_order * i.quantity).sum()
}

/// Sum of price_at_order * quantity over delivered lines, in cents
pub fn delivered_subtotal(items: &[OrderItemDetail]) -> i64 {
    items
        .iter()
        .filter(|i| i.is_delivered)
        .map(|i| i.price_at_order * i.quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price_at_order: i64, quantity: i64, is_delivered: bool) -> OrderItemDetail {
        OrderItemDetail {
            id: 0,
            order_id: 0,
            menu_item_id: 0,
            name: "x".into(),
            size: "33cl".into(),
            unit: "bottle".into(),
            quantity,
            price_at_order,
            line_total: price_at_order * quantity,
            is_delivered,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn empty_order_bills_zero() {
        assert_eq!(invoice_total(&[]), 0);
        assert_eq!(delivered_subtotal(&[]), 0);
    }

    #[test]
    fn invoice_counts_all_lines_delivered_counts_delivered() {
        let items = vec![line(950, 2, true), line(300, 1, false)];
        assert_eq!(invoice_total(&items), 2200);
        assert_eq!(delivered_subtotal(&items), 1900);
    }

    #[test]
    fn total_is_independent_of_line_order() {
        let a = vec![line(950, 2, true), line(300, 3, false), line(125, 1, true)];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(invoice_total(&a), invoice_total(&b));
        assert_eq!(delivered_subtotal(&a), delivered_subtotal(&b));
    }
}
