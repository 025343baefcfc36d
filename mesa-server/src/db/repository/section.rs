//! Section Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, Section, SectionCreate, SectionUpdate, SectionWithTables};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Section>> {
    let sections = sqlx::query_as::<_, Section>(
        "SELECT id, name, description FROM section ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(sections)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Section>> {
    let section =
        sqlx::query_as::<_, Section>("SELECT id, name, description FROM section WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(section)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Section>> {
    let section = sqlx::query_as::<_, Section>(
        "SELECT id, name, description FROM section WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(section)
}

pub async fn create(pool: &SqlitePool, data: SectionCreate) -> RepoResult<Section> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Section '{}' already exists",
            data.name
        )));
    }
    let id = snowflake_id();
    sqlx::query("INSERT INTO section (id, name, description) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create section".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SectionUpdate) -> RepoResult<Section> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Section '{}' already exists",
            name
        )));
    }
    let rows = sqlx::query(
        "UPDATE section SET name = COALESCE(?1, name), description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Section {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Section {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Tables fall back to no section; order history is untouched.
    let rows = sqlx::query("DELETE FROM section WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// All sections with their tables, for the browse view
pub async fn find_all_with_tables(pool: &SqlitePool) -> RepoResult<Vec<SectionWithTables>> {
    let sections = find_all(pool).await?;
    let mut result = Vec::with_capacity(sections.len());
    for section in sections {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT id, name, section_id, in_use, description FROM dining_table WHERE section_id = ? ORDER BY name",
        )
        .bind(section.id)
        .fetch_all(pool)
        .await?;
        result.push(SectionWithTables { section, tables });
    }
    Ok(result)
}

/// Sections that still have at least one free table
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<Section>> {
    let sections = sqlx::query_as::<_, Section>(
        "SELECT DISTINCT s.id, s.name, s.description FROM section s \
         JOIN dining_table t ON t.section_id = s.id WHERE t.in_use = 0 ORDER BY s.name",
    )
    .fetch_all(pool)
    .await?;
    Ok(sections)
}
