use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::product::models::Product;

pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_products;
pub use update_product::update_product;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.value(),
            image: product.image.clone(),
            product_type: product.product_type.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
