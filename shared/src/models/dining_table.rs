//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity (桌台)
///
/// `in_use` is owned by the order lifecycle engine: it is true exactly
/// while an unfinished order references this table, and table-edit
/// payloads cannot touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub section_id: Option<i64>,
    pub in_use: bool,
    pub description: Option<String>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub section_id: Option<i64>,
    pub description: Option<String>,
}

/// Update dining table payload (no `in_use`: occupancy is not editable)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub section_id: Option<i64>,
    pub description: Option<String>,
}
