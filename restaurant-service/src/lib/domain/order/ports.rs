use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::UpdateOrderCommand;

/// Port for order domain service operations.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    /// Create a pending order, snapshotting every requested product.
    ///
    /// # Arguments
    /// * `command` - Validated command with staff member, client and lines
    ///
    /// # Errors
    /// * `ProductNotFound` - A line references a product that does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_order(&self, command: CreateOrderCommand) -> Result<Order, OrderError>;

    /// # Errors
    /// * `NotFound` - Order does not exist
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderError>;

    async fn list_orders(&self) -> Result<Vec<Order>, OrderError>;

    /// Update any of staff member, client, lines and status. New lines are
    /// snapshotted like on creation.
    ///
    /// # Errors
    /// * `NotFound` - Order does not exist
    /// * `ProductNotFound` - A new line references a product that does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_order(
        &self,
        id: &OrderId,
        command: UpdateOrderCommand,
    ) -> Result<Order, OrderError>;

    /// Delete an order and return it.
    ///
    /// # Errors
    /// * `NotFound` - Order does not exist
    async fn delete_order(&self, id: &OrderId) -> Result<Order, OrderError>;
}

/// Persistence operations for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<Order, OrderError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// All orders, oldest first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;

    /// # Errors
    /// * `NotFound` - Order does not exist
    async fn update(&self, order: Order) -> Result<Order, OrderError>;

    /// # Errors
    /// * `NotFound` - Order does not exist
    async fn delete(&self, id: &OrderId) -> Result<(), OrderError>;
}
