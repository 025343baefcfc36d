//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuGroup, MenuItem, MenuItemDetail};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const SELECT: &str =
    "SELECT id, product_id, category_id, price, is_active, handle FROM menu_item";

const DETAIL_SELECT: &str = "SELECT mi.id, mi.product_id, p.name, p.size, p.unit, \
     mi.category_id, mc.name AS category_name, mi.price, mi.is_active, mi.handle \
     FROM menu_item mi \
     JOIN product p ON p.id = mi.product_id \
     LEFT JOIN menu_category mc ON mc.id = mi.category_id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItemDetail>> {
    let sql = format!("{DETAIL_SELECT} ORDER BY p.name, p.size");
    let items = sqlx::query_as::<_, MenuItemDetail>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_product(pool: &SqlitePool, product_id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{SELECT} WHERE product_id = ? LIMIT 1");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Create the menu item for a product. `price` is already cents.
pub async fn create(
    pool: &SqlitePool,
    product_id: i64,
    category_id: Option<i64>,
    price: i64,
) -> RepoResult<MenuItem> {
    let product = super::product::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {product_id} not found")))?;

    if find_by_product(pool, product_id).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Product {product_id} already has a menu item"
        )));
    }

    if let Some(category_id) = category_id
        && super::menu_category::find_by_id(pool, category_id).await?.is_none()
    {
        return Err(RepoError::NotFound(format!("Category {category_id} not found")));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, product_id, category_id, price, is_active, handle) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
    )
    .bind(id)
    .bind(product_id)
    .bind(category_id)
    .bind(price)
    .bind(&product.handle)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Update category / price / active flag. Existing order lines keep
/// their captured price; this only affects future ones.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    category_id: Option<i64>,
    price: Option<i64>,
    is_active: Option<bool>,
) -> RepoResult<MenuItem> {
    if let Some(category_id) = category_id
        && super::menu_category::find_by_id(pool, category_id).await?.is_none()
    {
        return Err(RepoError::NotFound(format!("Category {category_id} not found")));
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET category_id = COALESCE(?1, category_id), price = COALESCE(?2, price), is_active = COALESCE(?3, is_active) WHERE id = ?4",
    )
    .bind(category_id)
    .bind(price)
    .bind(is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Hard delete. Order lines referencing this item cascade with it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Free-text search across the product's name, size and unit
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<MenuItemDetail>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{DETAIL_SELECT} WHERE p.name LIKE ?1 OR p.size LIKE ?1 OR p.unit LIKE ?1 ORDER BY p.name, p.size"
    );
    let items = sqlx::query_as::<_, MenuItemDetail>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

/// Active menu grouped by category, for the ordering flow.
/// Uncategorized items come last.
pub async fn active_menu(pool: &SqlitePool) -> RepoResult<Vec<MenuGroup>> {
    let sql = format!(
        "{DETAIL_SELECT} WHERE mi.is_active = 1 \
         ORDER BY mc.name IS NULL, mc.name, p.name, p.size"
    );
    let items = sqlx::query_as::<_, MenuItemDetail>(&sql).fetch_all(pool).await?;

    let mut groups: Vec<MenuGroup> = Vec::new();
    for item in items {
        match groups.last_mut() {
            Some(group) if group.category_id == item.category_id => group.items.push(item),
            _ => groups.push(MenuGroup {
                category_id: item.category_id,
                category_name: item.category_name.clone(),
                items: vec![item],
            }),
        }
    }
    Ok(groups)
}

/// Items of one category, addressed by its handle (menu browsing)
pub async fn find_by_category_handle(
    pool: &SqlitePool,
    handle: &str,
) -> RepoResult<Vec<MenuItemDetail>> {
    let category = super::menu_category::find_by_handle(pool, handle)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category '{handle}' not found")))?;
    let sql = format!("{DETAIL_SELECT} WHERE mi.category_id = ? ORDER BY p.name, p.size");
    let items = sqlx::query_as::<_, MenuItemDetail>(&sql)
        .bind(category.id)
        .fetch_all(pool)
        .await?;
    Ok(items)
}
