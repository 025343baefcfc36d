//! Section Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Section entity (dining area: hall, terrace, bar...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Section {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Create section payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SectionCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub description: Option<String>,
}

/// Update section payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SectionUpdate {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Section with its tables, for the browse view
#[derive(Debug, Clone, Serialize)]
pub struct SectionWithTables {
    pub section: Section,
    pub tables: Vec<super::DiningTable>,
}
