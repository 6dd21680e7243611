//! Common error types and handling for Keystead
//!
//! Every callable operation reports failures through one of four
//! categories, each with a stable machine-readable code so clients can
//! distinguish re-authentication from form errors from backend failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Keystead role service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No verified caller identity. Not retryable without re-authenticating.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Missing/malformed input. Safe to name the offending value and the
    /// valid set; the caller can correct and retry.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller lacks privilege. Messages stay low-detail so a denial never
    /// reveals whether the target account exists or what role it holds.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Backend failure. Carries the underlying message for operator
    /// diagnosis; never implies partial success.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Error::Internal(_) | Error::Unexpected(_) | Error::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unauthenticated(_) => "UNAUTHENTICATED",
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::PermissionDenied(_) => "PERMISSION_DENIED",
            Error::Internal(_) | Error::Unexpected(_) | Error::Serialization(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Log internal errors with full context
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "Internal server error");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
