//! Repository Module
//!
//! CRUD and query functions over the SQLite store, one module per
//! entity. Free functions taking `&SqlitePool`, like the rest of the
//! data layer. Lifecycle mutations (occupancy, finalization) do NOT
//! live here — they belong to [`crate::orders`].

pub mod dining_table;
pub mod menu_category;
pub mod menu_item;
pub mod order;
pub mod product;
pub mod section;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Still referenced: {0}")]
    Referenced(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
