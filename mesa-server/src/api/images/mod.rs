//! Image API 模块
//!
//! 签名 URL 读取接口；上传在各资源自己的 `/{id}/image` 路由。

pub(crate) mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/images/{*key}", get(handler::serve))
}
