//! Multi-step lifecycle flows

use super::*;
use crate::db::repository::order as order_repo;
use crate::orders::{
    OrderError, add_order_item, bulk_finalize_open_orders, deliver_order_item, finalize_order,
    mark_paid, switch_table,
};

/// Activate → add 2× burger @9.50 → deliver → finalize → pay.
/// The invoice ends at 19.00 and the occupancy invariant holds after
/// every single step.
#[tokio::test]
async fn full_table_service_flow() {
    let pool = test_pool().await;
    let table_id = seed_table(&pool, "T1", None).await;
    let burger = seed_menu_item(&pool, "Burger", 950).await;

    let order = activate_table(&pool, table_id).await.unwrap();
    assert_occupancy_invariant(&pool).await;

    let item = add_order_item(&pool, order.id, burger, 2).await.unwrap();
    assert_eq!(item.price_at_order * item.quantity, 1900);
    assert_occupancy_invariant(&pool).await;

    let delivered = deliver_order_item(&pool, item.id).await.unwrap();
    assert!(delivered.is_delivered);
    assert_occupancy_invariant(&pool).await;

    let finalized = finalize_order(&pool, order.id).await.unwrap();
    assert!(finalized.is_finished);
    assert_occupancy_invariant(&pool).await;

    let paid = mark_paid(&pool, order.id).await.unwrap();
    assert!(paid.is_paid);
    assert_occupancy_invariant(&pool).await;

    let detail = order_repo::find_detail(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(detail.invoice_total, 1900);
    assert_eq!(detail.delivered_subtotal, 1900);
    assert_eq!(detail.invoice_total_display, "19.00");
}

#[tokio::test]
async fn add_item_to_finalized_order_creates_no_record() {
    let pool = test_pool().await;
    let (_, order) = open_order(&pool, "T1").await;
    let burger = seed_menu_item(&pool, "Burger", 950).await;

    finalize_order(&pool, order.id).await.unwrap();

    let err = add_order_item(&pool, order.id, burger, 1).await.unwrap_err();
    assert!(matches!(err, OrderError::OrderFinalized(_)));

    let items = order_repo::find_items(&pool, order.id).await.unwrap();
    assert!(items.is_empty());
}

/// Undelivered and delivered lines split the two bill variants.
#[tokio::test]
async fn delivered_subtotal_tracks_delivery_not_invoice() {
    let pool = test_pool().await;
    let (_, order) = open_order(&pool, "T1").await;
    let burger = seed_menu_item(&pool, "Burger", 950).await;
    let beer = seed_menu_item(&pool, "Estrella", 300).await;

    let burger_line = add_order_item(&pool, order.id, burger, 2).await.unwrap();
    add_order_item(&pool, order.id, beer, 3).await.unwrap();
    deliver_order_item(&pool, burger_line.id).await.unwrap();

    let detail = order_repo::find_detail(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(detail.invoice_total, 1900 + 900);
    assert_eq!(detail.delivered_subtotal, 1900);
}

/// Moving an order between tables keeps exactly one of the two
/// occupied, then close-out frees everything.
#[tokio::test]
async fn switch_then_close_out() {
    let pool = test_pool().await;
    let (first_table, order) = open_order(&pool, "T1").await;
    let second_table = seed_table(&pool, "T2", None).await;

    switch_table(&pool, order.id, second_table).await.unwrap();
    assert_occupancy_invariant(&pool).await;

    let occupied = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_table WHERE in_use = 1 AND id IN (?1, ?2)",
    )
    .bind(first_table)
    .bind(second_table)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(occupied, 1);

    let count = bulk_finalize_open_orders(&pool).await.unwrap();
    assert_eq!(count, 1);
    assert_occupancy_invariant(&pool).await;
}

#[tokio::test]
async fn finalized_orders_show_up_in_history_not_open() {
    let pool = test_pool().await;
    let (_, open) = open_order(&pool, "T1").await;
    let (_, closing) = open_order(&pool, "T2").await;
    finalize_order(&pool, closing.id).await.unwrap();

    let open_list = order_repo::find_open(&pool).await.unwrap();
    assert_eq!(open_list.len(), 1);
    assert_eq!(open_list[0].id, open.id);

    let history = order_repo::find_historical(&pool).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, closing.id);

    let paid = order_repo::find_paid(&pool).await.unwrap();
    assert!(paid.is_empty());

    mark_paid(&pool, closing.id).await.unwrap();
    let paid = order_repo::find_paid(&pool).await.unwrap();
    assert_eq!(paid.len(), 1);
}

#[tokio::test]
async fn undelivered_feed_only_covers_open_orders() {
    let pool = test_pool().await;
    let (_, staying) = open_order(&pool, "T1").await;
    let (_, leaving) = open_order(&pool, "T2").await;
    let burger = seed_menu_item(&pool, "Burger", 950).await;

    add_order_item(&pool, staying.id, burger, 1).await.unwrap();
    add_order_item(&pool, leaving.id, burger, 2).await.unwrap();
    finalize_order(&pool, leaving.id).await.unwrap();

    let feed = order_repo::find_undelivered(&pool).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].order_id, staying.id);
    assert_eq!(feed[0].table_name, "T1");
}
