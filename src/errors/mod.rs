//! Error handling module for the records backend.
//!
//! Provides the central error type with mapping to HTTP status codes and the
//! `{"error": "..."}` response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::EntityKind;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Unrecognized `/api/{type}` segment
    InvalidKind(String),
    /// Required create field absent or blank
    MissingField(&'static str),
    /// Malformed or unsupported request body
    BadRequest(String),
    /// Request body over the configured size limit
    PayloadTooLarge(String),
    /// No record with the requested identifier
    NotFound(EntityKind),
    /// Unexpected failure while handling the request
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidKind(_) => StatusCode::BAD_REQUEST,
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message.
    ///
    /// Internal details are never exposed; they are logged where the error is raised.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidKind(_) => "Invalid type".to_string(),
            AppError::MissingField(field) => format!("Missing field: {}", field),
            AppError::BadRequest(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::NotFound(kind) => format!("{} not found", kind.singular()),
            AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }

    /// Map a body extractor rejection, keeping 413 for oversized bodies.
    pub fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidKind(kind) => write!(f, "invalid type: {}", kind),
            AppError::Internal(detail) => write!(f, "internal error: {}", detail),
            other => f.write_str(&other.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Internal(format!("I/O error: {}", err))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidKind("widgets".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingField("name").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(EntityKind::Teachers).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_keeps_payload_too_large() {
        let err = AppError::rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".into());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.message(), "too big");

        let err = AppError::rejected(StatusCode::UNPROCESSABLE_ENTITY, "bad json".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_uses_singular_name() {
        assert_eq!(
            AppError::NotFound(EntityKind::Classes).message(),
            "class not found"
        );
        assert_eq!(
            AppError::NotFound(EntityKind::Students).message(),
            "student not found"
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::Internal("/var/uploads: permission denied".into());
        assert_eq!(ErrorResponse::from(&err).error, "Internal Server Error");
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_io_error_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: AppError = io.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
