use axum::{http::StatusCode, response::Json};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::RestaurantNotFound,
            StoreError::Validation(message) => ApiError::Validation(vec![message]),
            StoreError::Database(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::RestaurantNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Restaurant not found"
                })),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": errors
                })),
            )
                .into_response(),
            ApiError::InternalError(message) => {
                error!("request failed: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": message
                    })),
                )
                    .into_response()
            }
        }
    }
}
