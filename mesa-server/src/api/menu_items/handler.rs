//! Menu Item API Handlers
//!
//! Prices cross the API as 2-fraction-digit decimal strings and live
//! as integer cents from here on.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::menu_item as repo;
use crate::utils::{AppError, AppResult};
use shared::models::{MenuGroup, MenuItem, MenuItemCreate, MenuItemDetail, MenuItemUpdate};
use shared::money::cents_from_str;

#[derive(Debug, Deserialize)]
pub struct MenuItemQuery {
    pub q: Option<String>,
}

/// GET /api/menu-items?q= - 菜单项列表 / 检索
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuItemQuery>,
) -> AppResult<Json<Vec<MenuItemDetail>>> {
    let items = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => repo::search(&state.pool, q).await?,
        None => repo::find_all(&state.pool).await?,
    };
    Ok(Json(items))
}

/// GET /api/menu-items/active - 点单菜单（按分类分组，仅激活项）
pub async fn active_menu(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuGroup>>> {
    let groups = repo::active_menu(&state.pool).await?;
    Ok(Json(groups))
}

/// GET /api/menu-items/category/:handle - 分类下的菜单项
pub async fn by_category_handle(
    State(state): State<ServerState>,
    Path(handle): Path<String>,
) -> AppResult<Json<Vec<MenuItemDetail>>> {
    let items = repo::find_by_category_handle(&state.pool, &handle).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Menu item {id} not found")))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let price = cents_from_str(&payload.price)?;
    let item = repo::create(&state.pool, payload.product_id, payload.category_id, price).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - 更新菜单项（已有订单行保留捕获价）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let price = payload.price.as_deref().map(cents_from_str).transpose()?;
    let item =
        repo::update(&state.pool, id, payload.category_id, price, payload.is_active).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - 删除菜单项（历史订单行级联删除）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = repo::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}
