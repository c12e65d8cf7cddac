use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::OrderData;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::OrderLine;
use crate::domain::product::models::ProductId;
use crate::domain::user::models::UserId;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .order_service
        .create_order(command)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::CREATED, order.into()))
}

/// HTTP request body for creating an order (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateOrderRequest {
    user_id: Option<String>,
    client: Option<String>,
    products: Option<Vec<OrderLineRequest>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderLineRequest {
    product_id: Option<String>,
    qty: Option<i64>,
}

impl OrderLineRequest {
    fn try_into_line(self) -> Result<OrderLine, OrderError> {
        let product_id =
            present(self.product_id).ok_or(OrderError::MissingField("product_id"))?;
        let product_id =
            ProductId::from_string(&product_id).map_err(|_| OrderError::InvalidField {
                field: "product_id",
                value: product_id.clone(),
            })?;

        let qty = self.qty.ok_or(OrderError::MissingField("qty"))?;
        let qty = u32::try_from(qty)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(OrderError::InvalidQuantity(qty))?;

        Ok(OrderLine { product_id, qty })
    }
}

impl CreateOrderRequest {
    fn try_into_command(self) -> Result<CreateOrderCommand, OrderError> {
        let user_id = present(self.user_id).ok_or(OrderError::MissingField("user_id"))?;
        let client = present(self.client).ok_or(OrderError::MissingField("client"))?;
        let lines = self
            .products
            .filter(|lines| !lines.is_empty())
            .ok_or(OrderError::MissingField("products"))?;

        let user_id = parse_user_id(&user_id)?;
        let lines = parse_lines(lines)?;

        Ok(CreateOrderCommand {
            user_id,
            client: client.trim().to_string(),
            lines,
        })
    }
}

pub(super) fn parse_user_id(raw: &str) -> Result<UserId, OrderError> {
    UserId::from_string(raw).map_err(|_| OrderError::InvalidField {
        field: "user_id",
        value: raw.to_string(),
    })
}

pub(super) fn parse_lines(lines: Vec<OrderLineRequest>) -> Result<Vec<OrderLine>, OrderError> {
    lines
        .into_iter()
        .map(OrderLineRequest::try_into_line)
        .collect()
}
