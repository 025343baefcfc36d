//! Product Model

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Unit of sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
pub enum Unit {
    Draft,
    Bottle,
    Can,
    Glass,
    Bowl,
    Plate,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Draft => "draft",
            Unit::Bottle => "bottle",
            Unit::Can => "can",
            Unit::Glass => "glass",
            Unit::Bowl => "bowl",
            Unit::Plate => "plate",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product entity
///
/// `handle` is derived from name+size+unit at first save and immutable
/// afterwards. `image` holds a blob-store key, not a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub size: String,
    pub unit: Unit,
    pub description: Option<String>,
    pub image: Option<String>,
    pub handle: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub size: String,
    pub unit: Unit,
    pub description: Option<String>,
}

/// Update product payload (`handle` intentionally absent)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub size: Option<String>,
    pub unit: Option<Unit>,
    pub description: Option<String>,
}
