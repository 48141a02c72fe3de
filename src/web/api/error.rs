use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::provider::ProviderError;

pub enum ApiError {
    NotFound,
    Validation(String),
    Upstream(ProviderError),
    DisplayStopped,
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotFound(_) => ApiError::NotFound,
            ProviderError::InvalidRequest(msg) => ApiError::Validation(msg),
            _ => ApiError::Upstream(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Airport not found")),
            )
                .into_response(),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&msg))).into_response()
            }
            ApiError::Upstream(e) => {
                log::warn!("Upstream request failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("upstream_error", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::DisplayStopped => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("display_stopped")),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: &str) -> Self {
        ErrorResponse {
            status: status.to_string(),
            message: None,
        }
    }

    pub fn with_message(status: &str, message: &str) -> Self {
        ErrorResponse {
            status: status.to_string(),
            message: Some(message.to_string()),
        }
    }
}
