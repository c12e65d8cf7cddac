use thiserror::Error;

/// Error for OrderId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all order-related operations
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Invalid order ID: {0}")]
    InvalidOrderId(#[from] OrderIdError),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
