//! Order API 模块

pub(crate) mod handler;

use axum::{Router, routing::delete, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/open", get(handler::list_open))
        .route("/historical", get(handler::list_historical))
        .route("/paid", get(handler::list_paid))
        .route("/search", get(handler::search))
        .route("/undelivered", get(handler::list_undelivered))
        .route("/{id}", get(handler::get_detail))
        .route("/{id}/finalize", post(handler::finalize))
        .route("/items", post(handler::add_item))
        .route("/items/{id}/deliver", post(handler::deliver_item))
        .route("/items/{id}", delete(handler::delete_item))
        .route("/pay", post(handler::pay))
        .route("/switch-table", post(handler::switch_table))
        .route("/finalize-all", post(handler::finalize_all))
}
