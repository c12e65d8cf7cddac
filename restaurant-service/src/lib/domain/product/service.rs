use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn find(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        if self.repository.find_by_name(&command.name).await?.is_some() {
            return Err(ProductError::NameAlreadyExists(command.name));
        }

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            price: command.price,
            image: command.image,
            product_type: command.product_type,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "Product created");

        Ok(created)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.find(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.find(id).await?;

        if let Some(name) = command.name {
            if name != product.name {
                if let Some(existing) = self.repository.find_by_name(&name).await? {
                    if existing.id != *id {
                        return Err(ProductError::NameAlreadyExists(name));
                    }
                }
                product.name = name;
            }
        }

        if let Some(price) = command.price {
            product.price = price;
        }

        if let Some(image) = command.image {
            product.image = image;
        }

        if let Some(product_type) = command.product_type {
            product.product_type = product_type;
        }

        product.updated_at = Utc::now();

        self.repository.update(product).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        let product = self.find(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");

        Ok(product)
    }
}
