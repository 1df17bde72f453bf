//! Error handling for the Plant Disease Advisory Platform
//!
//! Provides consistent JSON error responses across the API.

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
    // External service errors
    #[error("Inference service error: {0}")]
    InferenceError(String),

    #[error("Weather service unavailable: {0}")]
    WeatherUnavailable(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
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
        let (status, code, message) = match &self {
            AppError::InferenceError(msg) => (
                StatusCode::BAD_GATEWAY,
                "INFERENCE_ERROR",
                format!("Inference service error: {}", msg),
            ),
            AppError::WeatherUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "WEATHER_UNAVAILABLE",
                format!("Weather service unavailable: {}", msg),
            ),
            AppError::DatabaseError(e) => {
                // Storage detail stays in the logs, not the response
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience alias for handler and service results
pub type AppResult<T> = Result<T, AppError>;
