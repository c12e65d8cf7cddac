use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderItem;
use crate::domain::order::models::OrderLine;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::OrderedProduct;
use crate::domain::order::models::UpdateOrderCommand;
use crate::domain::order::ports::OrderRepository;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::product::ports::ProductRepository;

/// Domain service implementation for order operations.
///
/// Reads products to snapshot them into new orders.
pub struct OrderService<OR, PR>
where
    OR: OrderRepository,
    PR: ProductRepository,
{
    orders: Arc<OR>,
    products: Arc<PR>,
}

impl<OR, PR> OrderService<OR, PR>
where
    OR: OrderRepository,
    PR: ProductRepository,
{
    pub fn new(orders: Arc<OR>, products: Arc<PR>) -> Self {
        Self { orders, products }
    }

    /// Copy the current state of every requested product into order items.
    async fn snapshot(&self, lines: &[OrderLine]) -> Result<Vec<OrderItem>, OrderError> {
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let product = self
                .products
                .find_by_id(&line.product_id)
                .await
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?
                .ok_or(OrderError::ProductNotFound(line.product_id.to_string()))?;

            items.push(OrderItem {
                qty: line.qty,
                product: OrderedProduct::from(&product),
            });
        }

        Ok(items)
    }

    async fn find(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<OR, PR> OrderServicePort for OrderService<OR, PR>
where
    OR: OrderRepository,
    PR: ProductRepository,
{
    async fn create_order(&self, command: CreateOrderCommand) -> Result<Order, OrderError> {
        let items = self.snapshot(&command.lines).await?;

        let now = Utc::now();
        let order = Order {
            id: OrderId::new(),
            user_id: command.user_id,
            client: command.client,
            products: items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            processed_at: None,
        };

        let created = self.orders.create(order).await?;
        tracing::info!(order_id = %created.id, user_id = %created.user_id, "Order created");

        Ok(created)
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.find(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.list_all().await
    }

    async fn update_order(
        &self,
        id: &OrderId,
        command: UpdateOrderCommand,
    ) -> Result<Order, OrderError> {
        let mut order = self.find(id).await?;

        if let Some(lines) = &command.lines {
            order.products = self.snapshot(lines).await?;
        }

        let now = Utc::now();

        if let Some(user_id) = command.user_id {
            order.user_id = user_id;
        }

        if let Some(client) = command.client {
            order.client = client;
        }

        if let Some(status) = command.status {
            order.transition(status, now);
        }

        order.updated_at = now;

        self.orders.update(order).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<Order, OrderError> {
        let order = self.find(id).await?;
        self.orders.delete(id).await?;
        tracing::info!(order_id = %id, "Order deleted");

        Ok(order)
    }
}
