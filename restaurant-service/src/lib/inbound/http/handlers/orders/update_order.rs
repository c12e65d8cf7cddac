use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_order::parse_lines;
use super::create_order::parse_user_id;
use super::create_order::OrderLineRequest;
use super::parse_order_id;
use super::OrderData;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::UpdateOrderCommand;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::handlers::present;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an order (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    user_id: Option<String>,
    client: Option<String>,
    products: Option<Vec<OrderLineRequest>>,
    status: Option<String>,
}

impl UpdateOrderRequest {
    /// Fields present in the body follow the creation rules.
    fn try_into_command(self) -> Result<UpdateOrderCommand, OrderError> {
        let user_id = self
            .user_id
            .map(|u| {
                present(Some(u))
                    .ok_or(OrderError::MissingField("user_id"))
                    .and_then(|u| parse_user_id(&u))
            })
            .transpose()?;

        let client = self
            .client
            .map(|c| present(Some(c)).ok_or(OrderError::MissingField("client")))
            .transpose()?;

        let lines = self
            .products
            .map(|lines| {
                if lines.is_empty() {
                    Err(OrderError::MissingField("products"))
                } else {
                    parse_lines(lines)
                }
            })
            .transpose()?;

        let status = self
            .status
            .map(|s| s.parse::<OrderStatus>())
            .transpose()?;

        Ok(UpdateOrderCommand {
            user_id,
            client: client.map(|c| c.trim().to_string()),
            lines,
            status,
        })
    }
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    JsonBody(body): JsonBody<UpdateOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let order_id = parse_order_id(&order_id)?;
    let command = body.try_into_command()?;

    if command.is_empty() {
        return Err(ApiError::BadRequest("nothing to update".to_string()));
    }

    state
        .order_service
        .update_order(&order_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::OK, order.into()))
}
