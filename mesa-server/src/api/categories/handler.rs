//! Menu Category API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use validator::Validate;

use crate::api::images::handler::{read_image_field, validate_image};
use crate::blobstore::BlobStore;
use crate::core::ServerState;
use crate::db::repository::menu_category as repo;
use crate::utils::{AppError, AppResult};
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};

/// GET /api/categories - 获取所有菜单分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = repo::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuCategory>> {
    let category = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;
    Ok(Json(category))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    payload.validate()?;
    let category = repo::create(&state.pool, payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id - 更新分类（handle 不变）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuCategoryUpdate>,
) -> AppResult<Json<MenuCategory>> {
    payload.validate()?;
    let category = repo::update(&state.pool, id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类（菜单项保留，分类置空）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let old_image = repo::delete(&state.pool, id).await?;
    if let Some(key) = old_image
        && let Err(e) = state.blobs.remove(&key)
    {
        tracing::warn!(key = %key, error = %e, "Failed to remove category image blob");
    }
    Ok(Json(true))
}

/// PUT /api/categories/:id/image - 上传分类图片
pub async fn attach_image(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<MenuCategory>> {
    repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    let upload = read_image_field(multipart).await?;
    validate_image(&upload)?;

    let key = BlobStore::object_key("category", id, &upload.filename);
    state.blobs.put(&key, &upload.data)?;

    let category = repo::set_image(&state.pool, id, &key).await?;
    tracing::info!(category_id = id, key = %key, "Category image attached");
    Ok(Json(category))
}
