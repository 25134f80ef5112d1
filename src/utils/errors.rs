//! Error handling
//!
//! Defines the application error type and how each variant is turned into
//! an HTTP response. Business-rule violations surface as 400/404 with a
//! readable message; everything else is a 500 that echoes the failure text.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Main application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    MissingReference(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid request parameter: {0}")]
    InvalidParameter(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("{message}: {detail}")]
    Failure { message: String, detail: String },
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    /// Attaches an operation-level message to generic failures.
    ///
    /// Business-rule errors keep their own message untouched.
    pub fn context(self, message: impl Into<String>) -> Self {
        match self {
            AppError::Database(e) => AppError::Failure {
                message: message.into(),
                detail: e.to_string(),
            },
            AppError::Internal(detail) => AppError::Failure {
                message: message.into(),
                detail,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Duplicate(_)
            | AppError::MissingReference(_)
            | AppError::Validation(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) | AppError::Failure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Duplicate(msg) => {
                warn!(reason = %msg, "duplicate unique field");
                ErrorResponse {
                    message: msg,
                    code: "DUPLICATE",
                    error: None,
                    details: None,
                }
            }

            AppError::MissingReference(msg) => {
                warn!(reason = %msg, "referenced record does not exist");
                ErrorResponse {
                    message: msg,
                    code: "MISSING_REFERENCE",
                    error: None,
                    details: None,
                }
            }

            AppError::NotFound(msg) => {
                warn!(reason = %msg, "resource not found");
                ErrorResponse {
                    message: msg,
                    code: "NOT_FOUND",
                    error: None,
                    details: None,
                }
            }

            AppError::Validation(e) => {
                warn!(errors = %e, "validation failed");
                ErrorResponse {
                    message: "The provided data is invalid".to_string(),
                    code: "VALIDATION_ERROR",
                    error: None,
                    details: Some(json!(e)),
                }
            }

            AppError::InvalidBody(detail) => {
                warn!(error = %detail, "request body rejected");
                ErrorResponse {
                    message: "The request body could not be read".to_string(),
                    code: "INVALID_BODY",
                    error: Some(detail),
                    details: None,
                }
            }

            AppError::InvalidParameter(detail) => {
                warn!(error = %detail, "request parameter rejected");
                ErrorResponse {
                    message: "A path or query parameter is invalid".to_string(),
                    code: "INVALID_PARAMETER",
                    error: Some(detail),
                    details: None,
                }
            }

            AppError::Database(e) => {
                error!(error = %e, "database error");
                ErrorResponse {
                    message: "An error occurred while accessing the database".to_string(),
                    code: "DB_ERROR",
                    error: Some(e.to_string()),
                    details: None,
                }
            }

            AppError::Internal(detail) => {
                error!(error = %detail, "internal error");
                ErrorResponse {
                    message: "An unexpected error occurred".to_string(),
                    code: "INTERNAL_ERROR",
                    error: Some(detail),
                    details: None,
                }
            }

            AppError::Failure { message, detail } => {
                error!(error = %detail, "{}", message);
                ErrorResponse {
                    message,
                    code: "INTERNAL_ERROR",
                    error: Some(detail),
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

/// Typed result for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Builds a single-field validation error
pub fn validation_error(
    field: &'static str,
    message: impl Into<std::borrow::Cow<'static, str>>,
) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found.", resource))
}

pub fn missing_reference_error(resource: &str) -> AppError {
    AppError::MissingReference(format!("{} not found.", resource))
}

pub fn duplicate_error(resource: &str, field: &str) -> AppError {
    AppError::Duplicate(format!("A {} with this {} already exists.", resource, field))
}
