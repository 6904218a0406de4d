//! HTTP error handling and response types.
//!
//! Every error leaves the server as a plain-text body of the form
//! `"<message>\n"`; the status code is the authoritative signal.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::db::repository::{RepositoryError, RepositoryResult};

pub const INVALID_INPUT: &str = "Invalid input";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Realm advertised in the `WWW-Authenticate` challenge.
pub const AUTH_CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Application error type for HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Request body could not be decoded
    BadRequest(&'static str),
    /// Missing or rejected credentials
    Unauthorized,
    /// Addressed record does not exist
    NotFound(&'static str),
    /// Storage rejected the operation
    Internal(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
            AppError::Unauthorized => UNAUTHORIZED,
        }
    }

    /// Map a repository failure: a missing record becomes 404, anything else
    /// is logged and reported as `failure` with status 500.
    pub fn from_repository(err: RepositoryError, failure: &'static str) -> Self {
        if err.is_not_found() {
            return AppError::NotFound(STUDENT_NOT_FOUND);
        }
        error!(error = %err, "{}", failure);
        AppError::Internal(failure)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = plain_text(self.message());
        match self {
            AppError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, AUTH_CHALLENGE)],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}

/// Newline-terminated plain-text body.
pub fn plain_text(message: &str) -> String {
    format!("{}\n", message)
}

/// Convert repository results at the handler boundary.
pub trait RepositoryResultExt<T> {
    /// Map the error with [`AppError::from_repository`].
    fn or_fail_with(self, failure: &'static str) -> Result<T, AppError>;
}

impl<T> RepositoryResultExt<T> for RepositoryResult<T> {
    fn or_fail_with(self, failure: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::from_repository(e, failure))
    }
}
