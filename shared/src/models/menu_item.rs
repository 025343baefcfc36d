//! Menu Item Model
//!
//! A menu item is the sellable wrapper around a product: price in
//! cents, category assignment, active flag. One product has at most
//! one menu item.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub product_id: i64,
    pub category_id: Option<i64>,
    /// Price in cents
    pub price: i64,
    pub is_active: bool,
    pub handle: String,
}

/// Create menu item payload; `price` is a 2-fraction-digit decimal string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    pub product_id: i64,
    pub category_id: Option<i64>,
    #[validate(length(min = 1, max = 20))]
    pub price: String,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub price: Option<String>,
    pub is_active: Option<bool>,
}

/// Menu item joined with its product and category, for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemDetail {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub size: String,
    pub unit: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    /// Price in cents
    pub price: i64,
    pub is_active: bool,
    pub handle: String,
}

/// One category's slice of the active menu
#[derive(Debug, Clone, Serialize)]
pub struct MenuGroup {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub items: Vec<MenuItemDetail>,
}
