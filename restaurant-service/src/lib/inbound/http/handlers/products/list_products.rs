use axum::extract::State;
use axum::http::StatusCode;

use super::ProductData;
use crate::inbound::http::extractors::Authenticated;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    state
        .product_service
        .list_products()
        .await
        .map_err(ApiError::from)
        .map(|products| {
            let data: Vec<ProductData> = products.iter().map(|p| p.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
