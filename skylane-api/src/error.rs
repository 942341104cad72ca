use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use skylane_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError {
        field: Option<String>,
        message: String,
    },
    NotFoundError(String),
    ConflictError {
        field: Option<String>,
        message: String,
    },
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, field, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, None, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, None, msg),
            AppError::ValidationError { field, message } => {
                (StatusCode::BAD_REQUEST, field, message)
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, None, msg),
            AppError::ConflictError { field, message } => (StatusCode::CONFLICT, field, message),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    None,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    None,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = match field {
            Some(field) => Json(json!({
                "error": error_message,
                "field": field,
            })),
            None => Json(json!({
                "error": error_message,
            })),
        };

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let field = err.field();
        match err {
            BookingError::Validation { .. } | BookingError::SeatOutOfRange { .. } => {
                Self::ValidationError {
                    field,
                    message: err.to_string(),
                }
            }
            BookingError::SeatTaken { .. } | BookingError::Duplicate { .. } => {
                Self::ConflictError {
                    field,
                    message: err.to_string(),
                }
            }
            BookingError::NotFound { .. } => Self::NotFoundError(err.to_string()),
            BookingError::Storage(msg) => Self::InternalServerError(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
