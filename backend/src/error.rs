//! Error handling for the Weather Forecast Service
//!
//! Provides consistent structured error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Query validation errors
    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // External service errors
    #[error("Weather provider error: {0}")]
    Provider(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::UnsupportedMetric(metric) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNSUPPORTED_METRIC".to_string(),
                    message: format!("Metric {} is not supported", metric),
                },
            ),
            AppError::InvalidArgument(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_ARGUMENT".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::Provider(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "PROVIDER_ERROR".to_string(),
                    message: format!("Weather provider error: {}", msg),
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
