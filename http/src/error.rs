use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use sentiment_application::ApplicationError;
use sentiment_domain::DomainError;

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    UnsupportedMediaType { message: String },
    PayloadTooLarge,
    Unprocessable { message: String, reason: &'static str },
    Internal { message: String, reason: &'static str },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, reason) = match self {
            HttpError::Validation { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, "validation_error")
            }
            HttpError::UnsupportedMediaType { message } => {
                (StatusCode::BAD_REQUEST, message, "unsupported_file_type")
            }
            HttpError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large".to_string(),
                "file_too_large",
            ),
            HttpError::Unprocessable { message, reason } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, reason)
            }
            HttpError::Internal { message, reason } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, reason)
            }
        };

        (
            status,
            Json(json!({
                "error": message,
                "reason": reason,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    let reason = error.reason();
    match &error {
        ApplicationError::Validation(_) => HttpError::Validation {
            message: error.to_string(),
        },
        ApplicationError::Domain(DomainError::NoContent)
        | ApplicationError::Domain(DomainError::Extraction(_)) => HttpError::Unprocessable {
            message: error.to_string(),
            reason,
        },
        _ => HttpError::Internal {
            message: error.to_string(),
            reason,
        },
    }
}
