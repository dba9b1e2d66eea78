use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, "DUPLICATE_ENTRY", msg.clone()),
            AppError::Ingest(e @ IngestError::NoRowsToInsert { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_ROWS_TO_INSERT",
                e.to_string(),
            ),
            AppError::Ingest(e) => (StatusCode::BAD_REQUEST, "INGEST_ERROR", e.to_string()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                match e {
                    StoreError::UniqueViolation(msg) => {
                        (StatusCode::CONFLICT, "DUPLICATE_ENTRY", msg.clone())
                    }
                    StoreError::NotFound { .. } => {
                        (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
                    }
                    StoreError::Database(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_ERROR",
                        e.to_string(),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
