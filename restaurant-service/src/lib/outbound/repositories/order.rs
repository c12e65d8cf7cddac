use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderItem;
use crate::domain::order::ports::OrderRepository;
use crate::domain::user::models::UserId;

/// Orders with their line items in a JSONB column.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    client: String,
    products: Json<Vec<OrderItem>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = OrderError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId(row.id),
            user_id: UserId(row.user_id),
            client: row.client,
            products: row.products.0,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            processed_at: row.processed_at,
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, client, products, status, created_at, updated_at, processed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id.0)
        .bind(order.user_id.0)
        .bind(&order.client)
        .bind(Json(&order.products))
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.processed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, client, products, status, created_at, updated_at, processed_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        row.map(Order::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, client, products, status, created_at, updated_at, processed_at
            FROM orders
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET client = $2, products = $3, status = $4, updated_at = $5, processed_at = $6
            WHERE id = $1
            "#,
        )
        .bind(order.id.0)
        .bind(&order.client)
        .bind(Json(&order.products))
        .bind(order.status.as_str())
        .bind(order.updated_at)
        .bind(order.processed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound(order.id.to_string()));
        }

        Ok(order)
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
