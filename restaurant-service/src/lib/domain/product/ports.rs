use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a product.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another product has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Apply the provided fields to an existing product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NameAlreadyExists` - New name belongs to another product
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete a product and return it.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: &ProductId) -> Result<Product, ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError>;

    /// All products, oldest first.
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NameAlreadyExists` - New name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
