use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
