use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ProductData;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::inbound::http::extractors::AdminOnly;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .product_service
        .create_product(command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    name: Option<String>,
    price: Option<f64>,
    image: Option<String>,
    #[serde(rename = "type")]
    product_type: Option<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        let name = present(self.name).ok_or(ProductError::MissingField("name"))?;
        let price = self.price.ok_or(ProductError::MissingField("price"))?;
        let image = present(self.image).ok_or(ProductError::MissingField("image"))?;
        let product_type = present(self.product_type).ok_or(ProductError::MissingField("type"))?;

        Ok(CreateProductCommand {
            name: name.trim().to_string(),
            price: Price::new(price)?,
            image,
            product_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_missing_field_wins() {
        let err = CreateProductRequest {
            image: Some("burger.png".to_string()),
            ..Default::default()
        }
        .try_into_command()
        .unwrap_err();
        assert!(matches!(err, ProductError::MissingField("name")));

        let err = CreateProductRequest {
            name: Some("Burger".to_string()),
            price: Some(10.0),
            ..Default::default()
        }
        .try_into_command()
        .unwrap_err();
        assert!(matches!(err, ProductError::MissingField("image")));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let err = CreateProductRequest {
            name: Some("Burger".to_string()),
            price: Some(0.0),
            image: Some("burger.png".to_string()),
            product_type: Some("lunch".to_string()),
        }
        .try_into_command()
        .unwrap_err();
        assert!(matches!(err, ProductError::InvalidPrice(_)));
    }
}
