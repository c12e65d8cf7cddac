use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ProductData;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::extractors::AdminOnly;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a product (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    name: Option<String>,
    price: Option<f64>,
    image: Option<String>,
    #[serde(rename = "type")]
    product_type: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        fn non_blank(
            value: Option<String>,
            field: &'static str,
        ) -> Result<Option<String>, ProductError> {
            value
                .map(|v| present(Some(v)).ok_or(ProductError::MissingField(field)))
                .transpose()
        }

        Ok(UpdateProductCommand {
            name: non_blank(self.name, "name")?.map(|n| n.trim().to_string()),
            price: self.price.map(Price::new).transpose()?,
            image: non_blank(self.image, "image")?,
            product_type: non_blank(self.product_type, "type")?,
        })
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    Path(product_id): Path<String>,
    JsonBody(body): JsonBody<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = ProductId::from_string(&product_id).map_err(ProductError::from)?;
    let command = body.try_into_command()?;

    if command.is_empty() {
        return Err(ApiError::BadRequest("nothing to update".to_string()));
    }

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
