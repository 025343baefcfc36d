//! Dining Table Repository
//!
//! CRUD plus availability queries. `in_use` is never written here:
//! occupancy transitions belong to the order lifecycle engine.

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, name, section_id, in_use, description FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{SELECT} ORDER BY name");
    let tables = sqlx::query_as::<_, DiningTable>(&sql).fetch_all(pool).await?;
    Ok(tables)
}

/// List tables filtered by occupancy and/or section
pub async fn find_filtered(
    pool: &SqlitePool,
    in_use: Option<bool>,
    section_id: Option<i64>,
) -> RepoResult<Vec<DiningTable>> {
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR in_use = ?1) AND (?2 IS NULL OR section_id = ?2) ORDER BY name"
    );
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(in_use)
        .bind(section_id)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

/// Free tables in a section, for the switch-table picker
pub async fn find_available_in_section(
    pool: &SqlitePool,
    section_id: i64,
) -> RepoResult<Vec<DiningTable>> {
    find_filtered(pool, Some(false), Some(section_id)).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

/// Find table by name in section (section may be NULL)
pub async fn find_by_name_in_section(
    pool: &SqlitePool,
    section_id: Option<i64>,
    name: &str,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE name = ?1 AND section_id IS ?2 LIMIT 1");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(name)
        .bind(section_id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    // Check duplicate name in same section
    if find_by_name_in_section(pool, data.section_id, &data.name)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists in this section",
            data.name
        )));
    }

    if let Some(section_id) = data.section_id {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM section WHERE id = ?")
            .bind(section_id)
            .fetch_one(pool)
            .await?;
        if exists == 0 {
            return Err(RepoError::NotFound(format!("Section {section_id} not found")));
        }
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, name, section_id, in_use, description) VALUES (?1, ?2, ?3, 0, ?4)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.section_id)
    .bind(&data.description)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Dining table {id} not found")))?;

    // Check duplicate name in section if changing name or section
    let check_section = data.section_id.or(existing.section_id);
    let check_name = data.name.as_deref().unwrap_or(&existing.name);

    if data.name.is_some() || data.section_id.is_some() {
        if let Some(found) = find_by_name_in_section(pool, check_section, check_name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists in this section",
                check_name
            )));
        }
    }

    sqlx::query(
        "UPDATE dining_table SET name = COALESCE(?1, name), section_id = COALESCE(?2, section_id), description = COALESCE(?3, description) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(data.section_id)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Dining table {id} not found")))
}

/// Delete a table. Blocked while any order (open or historical)
/// references it — order history is never cascaded away.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE table_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if referenced > 0 {
        return Err(RepoError::Referenced(format!(
            "Table {id} has {referenced} order(s); delete is blocked"
        )));
    }
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
