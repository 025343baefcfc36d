//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate, Unit};
use shared::util::{slugify, snowflake_id};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, name, size, unit, description, image, handle FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{SELECT} ORDER BY name, size");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn find_by_handle(pool: &SqlitePool, handle: &str) -> RepoResult<Option<Product>> {
    let sql = format!("{SELECT} WHERE handle = ? LIMIT 1");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(handle)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

async fn find_by_identity(
    pool: &SqlitePool,
    name: &str,
    unit: Unit,
    size: &str,
) -> RepoResult<Option<Product>> {
    let sql = format!("{SELECT} WHERE name = ?1 AND unit = ?2 AND size = ?3 LIMIT 1");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(name)
        .bind(unit)
        .bind(size)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Free-text search across name, size and unit
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Product>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{SELECT} WHERE name LIKE ?1 OR size LIKE ?1 OR unit LIKE ?1 ORDER BY name, size"
    );
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if find_by_identity(pool, &data.name, data.unit, &data.size)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Product '{} {} {}' already exists",
            data.name, data.size, data.unit
        )));
    }

    // Handle is computed exactly once, at first save.
    let handle = slugify(&format!("{} {} {}", data.name, data.size, data.unit));
    if handle.is_empty() {
        return Err(RepoError::Validation("Product name yields an empty handle".into()));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, name, size, unit, description, image, handle) VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.size)
    .bind(data.unit)
    .bind(&data.description)
    .bind(&handle)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update a product. The handle stays frozen at its first-save value
/// even when name/size/unit change.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

    let name = data.name.as_deref().unwrap_or(&existing.name);
    let size = data.size.as_deref().unwrap_or(&existing.size);
    let unit = data.unit.unwrap_or(existing.unit);

    if let Some(found) = find_by_identity(pool, name, unit, size).await?
        && found.id != existing.id
    {
        return Err(RepoError::Duplicate(format!(
            "Product '{} {} {}' already exists",
            name, size, unit
        )));
    }

    sqlx::query(
        "UPDATE product SET name = ?1, size = ?2, unit = ?3, description = COALESCE(?4, description) WHERE id = ?5",
    )
    .bind(name)
    .bind(size)
    .bind(unit)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Record the blob-store key after a successful image upload
/// (phase two of the two-phase save).
pub async fn set_image(pool: &SqlitePool, id: i64, key: &str) -> RepoResult<Product> {
    let rows = sqlx::query("UPDATE product SET image = ?1 WHERE id = ?2")
        .bind(key)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Hard delete; the menu item (if any) cascades with it. Returns the
/// old image key so the caller can drop the blob.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;
    sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(existing.image)
}
