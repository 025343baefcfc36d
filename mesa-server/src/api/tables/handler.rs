//! Dining Table API Handlers
//!
//! CRUD plus the activate transition, which belongs to the lifecycle
//! engine and not to the repository.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::orders::handler::{SESSION_HEADER, session_token};
use crate::core::ServerState;
use crate::db::repository::dining_table as repo;
use crate::orders;
use crate::utils::{AppError, AppResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, Order};

#[derive(Debug, Deserialize)]
pub struct TableFilter {
    pub in_use: Option<bool>,
    pub section_id: Option<i64>,
}

/// GET /api/tables?in_use=&section_id= - 获取桌台列表
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<TableFilter>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = repo::find_filtered(&state.pool, filter.in_use, filter.section_id).await?;
    Ok(Json(tables))
}

/// GET /api/tables/available/:section_id - 区域内空桌
pub async fn list_available(
    State(state): State<ServerState>,
    Path(section_id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = repo::find_available_in_section(&state.pool, section_id).await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {id} not found")))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = repo::create(&state.pool, payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = repo::update(&state.pool, id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台（有订单引用时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = repo::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}

/// POST /api/tables/:id/activate - 开台
///
/// 成功后把新订单绑定到当前终端会话（如带 session 头）。
pub async fn activate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Json<Order>> {
    let order = orders::activate_table(&state.pool, id).await?;
    if let Some(token) = session_token(&headers) {
        state.sessions.bind_active_order(token, order.id);
    } else {
        tracing::debug!(order_id = order.id, "Activate without {} header", SESSION_HEADER);
    }
    Ok(Json(order))
}
