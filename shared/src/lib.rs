//! Shared types for the Mesa order-management service
//!
//! Domain models, money helpers, and id/time/slug utilities used by
//! the server crate and by any future client crate.

pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
