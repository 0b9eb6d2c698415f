use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::StoreError;
use crate::domain::team::ValidationError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 502 Bad Gateway error for failures reported by the store
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::bad_gateway(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let err = ApiError::from(ValidationError::MissingField("name"));

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn store_error_maps_to_bad_gateway_with_fallback_message() {
        let err = ApiError::from(StoreError::Rejected(String::new()));

        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "unknown error");
    }
}
