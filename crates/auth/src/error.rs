//! Authentication errors
//!
//! Every variant surfaces as `UNAUTHENTICATED`: an absent caller identity
//! and a malformed one are equivalent at this boundary. There is no
//! "anonymous but trusted" path.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingAuthorization => "Authorization header required",
            AuthError::InvalidAuthorizationFormat => "Invalid authorization header format",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        let body = Json(json!({
            "error": {
                "code": "UNAUTHENTICATED",
                "message": message,
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
