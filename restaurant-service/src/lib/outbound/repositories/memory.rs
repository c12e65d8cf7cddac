//! In-process repositories backed by `RwLock<HashMap>`.
//!
//! Used when no database is configured and by the integration tests. They
//! enforce the same uniqueness rules as the PostgreSQL schema.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::ports::OrderRepository;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Page;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
    users
        .values()
        .any(|other| other.id != user.id && other.email == user.email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        let mut all: Vec<&User> = users.values().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });

        Ok(all
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(products: &HashMap<ProductId, Product>, product: &Product) -> bool {
    products
        .values()
        .any(|other| other.id != product.id && other.name == product.name)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;
        if name_taken(&products, &product) {
            return Err(ProductError::NameAlreadyExists(product.name));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .find(|product| product.name == name)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let mut all: Vec<Product> = self.products.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(all)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id.to_string()));
        }
        if name_taken(&products, &product) {
            return Err(ProductError::NameAlreadyExists(product.name));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        self.products
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut all: Vec<Order> = self.orders.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(all)
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(stored) => {
                *stored = order.clone();
                Ok(order)
            }
            None => Err(OrderError::NotFound(order.id.to_string())),
        }
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        self.orders
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(OrderError::NotFound(id.to_string()))
    }
}
