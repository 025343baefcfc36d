//! Product API Handlers
//!
//! Records save in two phases: the row first (no image), then the
//! image attach once an id exists to key the blob path. A blob
//! failure never rolls the record back.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::images::handler::{read_image_field, validate_image};
use crate::blobstore::BlobStore;
use crate::core::ServerState;
use crate::db::repository::product as repo;
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub q: Option<String>,
}

/// Product plus a short-lived image URL for display
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: Option<String>,
}

fn with_image_url(state: &ServerState, product: Product) -> ProductView {
    let image_url = product
        .image
        .as_deref()
        .map(|key| state.blobs.presigned_get_url(key, state.config.image_url_ttl_secs));
    ProductView { product, image_url }
}

/// GET /api/products?q= - 商品列表 / 全文检索
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<ProductView>>> {
    let products = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => repo::search(&state.pool, q).await?,
        None => repo::find_all(&state.pool).await?,
    };
    Ok(Json(products.into_iter().map(|p| with_image_url(&state, p)).collect()))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductView>> {
    let product = repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(with_image_url(&state, product)))
}

/// GET /api/products/handle/:handle - 按 handle 获取商品
pub async fn get_by_handle(
    State(state): State<ServerState>,
    Path(handle): Path<String>,
) -> AppResult<Json<ProductView>> {
    let product = repo::find_by_handle(&state.pool, &handle)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product '{handle}' not found")))?;
    Ok(Json(with_image_url(&state, product)))
}

/// POST /api/products - 创建商品（第一阶段：无图片）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    payload.validate()?;
    let product = repo::create(&state.pool, payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - 更新商品（handle 不变）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    payload.validate()?;
    let product = repo::update(&state.pool, id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品（菜单项级联）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let old_image = repo::delete(&state.pool, id).await?;
    if let Some(key) = old_image
        && let Err(e) = state.blobs.remove(&key)
    {
        // The record is gone either way; an orphan blob is harmless.
        tracing::warn!(key = %key, error = %e, "Failed to remove product image blob");
    }
    Ok(Json(true))
}

/// PUT /api/products/:id/image - 上传商品图片（第二阶段）
pub async fn attach_image(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<ProductView>> {
    // Record must exist before the blob path can be keyed by its id.
    repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    let upload = read_image_field(multipart).await?;
    validate_image(&upload)?;

    let key = BlobStore::object_key("product", id, &upload.filename);
    state.blobs.put(&key, &upload.data)?;

    let product = repo::set_image(&state.pool, id, &key).await?;
    tracing::info!(product_id = id, key = %key, size = upload.data.len(), "Product image attached");
    Ok(Json(with_image_url(&state, product)))
}
