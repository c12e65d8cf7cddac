use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderItem;
use crate::domain::order::models::OrderStatus;

pub mod create_order;
pub mod delete_order;
pub mod get_order;
pub mod list_orders;
pub mod update_order;

pub use create_order::create_order;
pub use delete_order::delete_order;
pub use get_order::get_order;
pub use list_orders::list_orders;
pub use update_order::update_order;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderData {
    pub id: String,
    pub user_id: String,
    pub client: String,
    pub products: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            client: order.client.clone(),
            products: order.products.clone(),
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            processed_at: order.processed_at,
        }
    }
}

fn parse_order_id(raw: &str) -> Result<OrderId, OrderError> {
    OrderId::from_string(raw).map_err(OrderError::from)
}
