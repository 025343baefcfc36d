//! Domain Models
//!
//! Entity structs plus their `Create`/`Update` payload shapes. The
//! `db` feature adds `sqlx::FromRow` so the server crate can map rows
//! directly; client-side consumers compile without sqlx.

pub mod dining_table;
pub mod menu_category;
pub mod menu_item;
pub mod order;
pub mod product;
pub mod section;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use menu_category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
pub use menu_item::{MenuGroup, MenuItem, MenuItemCreate, MenuItemDetail, MenuItemUpdate};
pub use order::{
    DashboardFeed, Order, OrderDetail, OrderItem, OrderItemDetail, OrderSummary, UndeliveredItem,
};
pub use product::{Product, ProductCreate, ProductUpdate, Unit};
pub use section::{Section, SectionCreate, SectionUpdate, SectionWithTables};
