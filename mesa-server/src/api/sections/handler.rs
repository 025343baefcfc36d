//! Section API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::section as repo;
use crate::utils::{AppError, AppResult};
use shared::models::{Section, SectionCreate, SectionUpdate, SectionWithTables};

/// GET /api/sections - 获取所有区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Section>>> {
    let sections = repo::find_all(&state.pool).await?;
    Ok(Json(sections))
}

/// GET /api/sections/with-tables - 区域及其桌台
pub async fn list_with_tables(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<SectionWithTables>>> {
    let sections = repo::find_all_with_tables(&state.pool).await?;
    Ok(Json(sections))
}

/// GET /api/sections/available - 仍有空桌的区域
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<Section>>> {
    let sections = repo::find_available(&state.pool).await?;
    Ok(Json(sections))
}

/// GET /api/sections/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Section>> {
    let section = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section {id} not found")))?;
    Ok(Json(section))
}

/// POST /api/sections - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SectionCreate>,
) -> AppResult<Json<Section>> {
    payload.validate()?;
    let section = repo::create(&state.pool, payload).await?;
    Ok(Json(section))
}

/// PUT /api/sections/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SectionUpdate>,
) -> AppResult<Json<Section>> {
    payload.validate()?;
    let section = repo::update(&state.pool, id, payload).await?;
    Ok(Json(section))
}

/// DELETE /api/sections/:id - 删除区域
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = repo::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}
