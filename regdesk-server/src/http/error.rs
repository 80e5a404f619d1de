//! API error types with IntoResponse
//!
//! Single boundary translation from domain errors to status codes. Every
//! body is `{"error": "..."}`; server-side failures are logged with detail
//! and answered with an opaque message.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::export::ExportError;
use crate::models::ValidationError;
use crate::render_csv::RenderError;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Wrong method (405, `Allow` header set)
    MethodNotAllowed { allow: &'static str },

    /// Body not declared as JSON (415)
    UnsupportedMediaType,

    /// Body exceeded the size cap (413)
    PayloadTooLarge,

    /// Body is not valid JSON (400)
    InvalidBody,

    /// Field validation failed (400)
    Validation(ValidationError),

    /// Store or connection failure (500, logged)
    Database(DbError),

    /// Export document could not be rendered (500, logged)
    Render(RenderError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidBody | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            Self::UnsupportedMediaType => {
                "Unsupported Media Type, use application/json".to_string()
            }
            Self::PayloadTooLarge => "Payload too large".to_string(),
            Self::InvalidBody => "Invalid JSON body".to_string(),
            Self::Validation(e) => e.to_string(),
            Self::Database(_) | Self::Render(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the actual error, return generic message
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Render(e) => tracing::error!("Export render error: {}", e),
            _ => {}
        }

        let status = self.status();
        let body = Json(json!({ "error": self.message() }));
        let mut response = (status, body).into_response();

        if let Self::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }

        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Db(e) => Self::Database(e),
            ExportError::Render(e) => Self::Render(e),
        }
    }
}
