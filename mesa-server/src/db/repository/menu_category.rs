//! Menu Category Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use shared::util::{slugify, snowflake_id};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, name, description, image, handle FROM menu_category";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuCategory>> {
    let sql = format!("{SELECT} ORDER BY name");
    let categories = sqlx::query_as::<_, MenuCategory>(&sql).fetch_all(pool).await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuCategory>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let category = sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn find_by_handle(pool: &SqlitePool, handle: &str) -> RepoResult<Option<MenuCategory>> {
    let sql = format!("{SELECT} WHERE handle = ? LIMIT 1");
    let category = sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(handle)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<MenuCategory>> {
    let sql = format!("{SELECT} WHERE name = ? LIMIT 1");
    let category = sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: MenuCategoryCreate) -> RepoResult<MenuCategory> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Category '{}' already exists",
            data.name
        )));
    }

    let handle = slugify(&data.name);
    if handle.is_empty() {
        return Err(RepoError::Validation("Category name yields an empty handle".into()));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO menu_category (id, name, description, image, handle) VALUES (?1, ?2, ?3, NULL, ?4)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&handle)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu category".into()))
}

/// Update; the handle stays frozen at its first-save value.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: MenuCategoryUpdate,
) -> RepoResult<MenuCategory> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!("Category '{}' already exists", name)));
    }

    let rows = sqlx::query(
        "UPDATE menu_category SET name = COALESCE(?1, name), description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Record the blob-store key after a successful image upload.
pub async fn set_image(pool: &SqlitePool, id: i64, key: &str) -> RepoResult<MenuCategory> {
    let rows = sqlx::query("UPDATE menu_category SET image = ?1 WHERE id = ?2")
        .bind(key)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Hard delete; menu items keep existing with their category unset.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;
    sqlx::query("DELETE FROM menu_category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(existing.image)
}
