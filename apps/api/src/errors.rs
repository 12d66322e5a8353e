use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Vector backend unavailable: {0}")]
    VectorUnavailable(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Roadmap error: {0}")]
    Roadmap(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "A user identity is required for this operation".to_string(),
            ),
            AppError::VectorUnavailable(msg) => {
                tracing::error!("Vector backend unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "VECTOR_BACKEND_UNAVAILABLE",
                    "The vector backend is unreachable. Verify QDRANT_URL and that the service is running."
                        .to_string(),
                )
            }
            AppError::Ingestion(msg) => {
                tracing::error!("Ingestion error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INGESTION_ERROR",
                    "Resume ingestion failed".to_string(),
                )
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Roadmap(msg) => {
                tracing::error!("Roadmap error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ROADMAP_ERROR",
                    "Roadmap generation failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
