use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;

const NAME_CONSTRAINT: &str = "products_name_key";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: f64,
    image: String,
    product_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: row.name,
            price: Price::new(row.price)?,
            image: row.image,
            product_type: row.product_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, product: &Product) -> ProductError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(NAME_CONSTRAINT) {
            return ProductError::NameAlreadyExists(product.name.clone());
        }
    }
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, image, product_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(product.price.value())
        .bind(&product.image)
        .bind(&product.product_type)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &product))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, image, product_type, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Product::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, image, product_type, created_at, updated_at
            FROM products
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Product::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, image, product_type, created_at, updated_at
            FROM products
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, image = $4, product_type = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(product.price.value())
        .bind(&product.image)
        .bind(&product.product_type)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &product))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
