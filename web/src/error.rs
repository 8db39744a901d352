//! Error types for web handlers.
//!
//! [`AppError`] bridges extractor rejections, repository failures and
//! validation results into HTTP responses. Validation failures render as an
//! error resource (`content` plus an `index` link); everything else renders
//! as `{ "code", "message" }`. Both are served as HAL JSON.

use crate::hal::{Hal, Links};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use event_api_core::page::PageError;
use event_api_core::repository::RepositoryError;
use event_api_core::validation::FieldError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Hal<EntityModel<Event>>, AppError> {
///     let event = repository.find_by_id(id).await?
///         .ok_or_else(|| AppError::not_found("Event", id))?;
///     Ok(Hal(EntityModel::new(event)))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Field errors and the index href, for validation failures
    rejected: Option<(Vec<FieldError>, String)>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            rejected: None,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 400 error carrying field errors.
    ///
    /// The response body lists `errors` under `content` and links back to
    /// the API index at `index_href`.
    #[must_use]
    pub fn validation_failed(errors: Vec<FieldError>, index_href: impl Into<String>) -> Self {
        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            format!("{} field error(s)", errors.len()),
            "VALIDATION_FAILED".to_string(),
        );
        error.rejected = Some((errors, index_href.into()));
        error
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Field errors, for validation failures.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        self.rejected
            .as_ref()
            .map_or(&[][..], |(errors, _)| errors.as_slice())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Error resource for rejected submissions.
#[derive(Debug, Serialize)]
struct ErrorResource {
    content: Vec<FieldError>,
    #[serde(rename = "_links")]
    links: Links,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        if let Some((content, index_href)) = self.rejected {
            let body = ErrorResource {
                content,
                links: Links::new().with("index", index_href),
            };
            return (self.status, Hal(body)).into_response();
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Hal(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::not_found("Event", id),
            RepositoryError::Unavailable(_) => {
                Self::internal("An internal error occurred").with_source(err.into())
            },
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
