//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`sections`] - 区域管理接口
//! - [`tables`] - 桌台管理接口
//! - [`products`] - 商品管理接口
//! - [`categories`] - 菜单分类管理接口
//! - [`menu_items`] - 菜单项管理接口
//! - [`orders`] - 订单生命周期接口
//! - [`reports`] - 营收统计接口
//! - [`images`] - 签名图片访问接口

pub mod health;

pub mod categories;
pub mod images;
pub mod menu_items;
pub mod orders;
pub mod products;
pub mod reports;
pub mod sections;
pub mod tables;

use crate::core::ServerState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(sections::router())
        .merge(tables::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(reports::router())
        .merge(images::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
