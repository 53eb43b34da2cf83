//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry and logged before the response is built; their detail
//! never reaches the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::{FieldError, ValidationErrors, request_field};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed (including uniqueness conflicts).
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Request fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Request body was not usable JSON.
    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),

    /// Path segment (an id) did not parse.
    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl AppError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Json(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(
                RepositoryError::Database(_)
                    | RepositoryError::Migration(_)
                    | RepositoryError::DataCorruption(_)
            ) | Self::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Wrong-typed fields are reported like any other validation failure
        if let Self::Json(JsonRejection::JsonDataError(rejection)) = &self {
            let details = [data_error_field(&rejection.body_text())];
            let body = ErrorBody {
                error: "Validation failed".to_owned(),
                details: Some(details.as_slice()),
            };
            return (status, Json(body)).into_response();
        }

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Validation(_) => "Validation failed".to_owned(),
            Self::Json(rejection) => rejection.body_text(),
            Self::Path(rejection) => rejection.body_text(),
            Self::NotFound(what) => format!("{what} not found"),
        };
        let details = match &self {
            Self::Validation(errors) => Some(errors.fields()),
            _ => None,
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Turn a JSON decode message into a field error.
///
/// The message reads `<prefix>: <path>: <problem>` when serde knows which
/// field failed, and `<prefix>: <problem>` otherwise.
fn data_error_field(text: &str) -> FieldError {
    let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);
    let named = detail
        .split_once(": ")
        .and_then(|(path, problem)| request_field(path).map(|field| (field, problem)));

    match named {
        Some((field, problem)) => FieldError {
            field,
            message: problem.to_owned(),
        },
        None => FieldError {
            field: "body",
            message: detail.to_owned(),
        },
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
