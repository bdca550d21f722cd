//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error responses so
//! every endpoint fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use gators_core::errors::AcademyError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain `AcademyError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub AcademyError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            AcademyError::NotFound(_) => StatusCode::NOT_FOUND,
            AcademyError::Validation(_) => StatusCode::BAD_REQUEST,
            AcademyError::Conflict(_) => StatusCode::CONFLICT,
            AcademyError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AcademyError::Authorization(_) => StatusCode::FORBIDDEN,
            AcademyError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AcademyError::PartialFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AcademyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows using `?` with functions that return `Result<T, AcademyError>`
/// in handlers returning `Result<T, AppError>`.
impl From<AcademyError> for AppError {
    fn from(err: AcademyError) -> Self {
        AppError(err)
    }
}

/// Wraps raw repository errors as persistence failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AcademyError::Persistence(err))
    }
}
