//! Reports API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/revenue-by-day", get(handler::revenue_by_day))
        .route("/quantity-by-product", get(handler::quantity_by_product))
        .route("/orders-by-hour", get(handler::orders_by_hour))
        .route("/revenue-by-category", get(handler::revenue_by_category))
}
