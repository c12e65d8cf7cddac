use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::errors::ProductIdError;

/// Menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub product_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Strictly positive, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// # Errors
    /// * `InvalidPrice` - Zero, negative, NaN or infinite
    pub fn new(value: f64) -> Result<Self, ProductError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ProductError::InvalidPrice(value.to_string()))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new product with validated fields
#[derive(Debug)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: Price,
    pub image: String,
    pub product_type: String,
}

/// Partial update of a product. Only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateProductCommand {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub product_type: Option<String>,
}

impl UpdateProductCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.product_type.is_none()
    }
}
