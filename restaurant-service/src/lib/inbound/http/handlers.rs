use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::order::errors::OrderError;
use crate::domain::product::errors::ProductError;
use crate::domain::user::errors::UserError;

pub mod login;
pub mod orders;
pub mod products;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Every failure a handler or middleware can end a request with.
///
/// Conflicts render as 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Forbidden(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) | ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(msg) => ApiError::Unauthorized(msg),
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
            AuthError::SubjectNotFound(msg) => ApiError::NotFound(msg),
            AuthError::Internal(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials
            | UserError::InvalidEmail(_)
            | UserError::InvalidRole(_)
            | UserError::MissingField(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidProductId(_) | ProductError::NotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProductError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            ProductError::MissingField(_) | ProductError::InvalidPrice(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ProductError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidOrderId(_)
            | OrderError::NotFound(_)
            | OrderError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            OrderError::MissingField(_)
            | OrderError::InvalidField { .. }
            | OrderError::InvalidStatus(_)
            | OrderError::InvalidQuantity(_) => ApiError::BadRequest(err.to_string()),
            OrderError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// A required text field: `None` when absent or blank.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
