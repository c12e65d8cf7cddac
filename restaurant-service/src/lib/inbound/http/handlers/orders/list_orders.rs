use axum::extract::State;
use axum::http::StatusCode;

use super::OrderData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    state
        .order_service
        .list_orders()
        .await
        .map_err(ApiError::from)
        .map(|orders| {
            let data: Vec<OrderData> = orders.iter().map(|o| o.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
