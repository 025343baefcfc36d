//! Lifecycle engine error types

use thiserror::Error;

/// Errors produced by order lifecycle actions
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Table occupied: {0}")]
    TableOccupied(String),

    #[error("Order finalized: {0}")]
    OrderFinalized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

/// Result type for lifecycle actions
pub type OrderResult<T> = Result<T, OrderError>;
