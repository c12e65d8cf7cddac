use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::errors::OrderIdError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::user::models::UserId;

/// Customer order taken by a staff member.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Staff member who took the order.
    pub user_id: UserId,
    pub client: String,
    pub products: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the order is delivered.
    pub processed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Move to `status`, stamping `processed_at` on delivery.
    pub fn transition(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        if status == OrderStatus::Delivered && self.status != OrderStatus::Delivered {
            self.processed_at = Some(at);
        }
        self.status = status;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OrderIdError> {
        Uuid::parse_str(s)
            .map(OrderId)
            .map_err(|e| OrderIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item: a quantity of a product as it was when the order was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub qty: u32,
    pub product: OrderedProduct,
}

/// Snapshot of a product embedded in an order. Later edits to the product do
/// not change past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

impl From<&Product> for OrderedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.value(),
            image: product.image.clone(),
            product_type: product.product_type.clone(),
        }
    }
}

/// Requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub qty: u32,
}

/// Command to create a new order with validated fields
#[derive(Debug)]
pub struct CreateOrderCommand {
    pub user_id: UserId,
    pub client: String,
    pub lines: Vec<OrderLine>,
}

/// Partial update of an order. New `lines` replace every existing item.
#[derive(Debug, Default)]
pub struct UpdateOrderCommand {
    pub user_id: Option<UserId>,
    pub client: Option<String>,
    pub lines: Option<Vec<OrderLine>>,
    pub status: Option<OrderStatus>,
}

impl UpdateOrderCommand {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.client.is_none()
            && self.lines.is_none()
            && self.status.is_none()
    }
}
