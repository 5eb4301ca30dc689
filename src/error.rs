use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::protocol::ErrorResponse;

/// Every way an appointment request can fail.
///
/// Client faults are detected before the store is touched; `Storage` and
/// `Timeout` are the only variants produced after a store call was made.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Appointment not found")]
    NotFound,

    #[error("{context}")]
    Storage {
        context: &'static str,
        cause: anyhow::Error,
    },

    #[error("Storage request timed out")]
    Timeout,
}

impl ApiError {
    pub fn log(&self, handler: &str) {
        match self {
            ApiError::Storage { cause, .. } => {
                tracing::error!(handler, error = %self, cause = ?cause, "storage call failed")
            }
            ApiError::Timeout => tracing::error!(handler, "storage call exceeded request deadline"),
            _ => tracing::warn!(handler, error = %self, "request rejected"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidJson(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } | ApiError::Timeout => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self))
    }
}
