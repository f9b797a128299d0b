//! HTTP responses for authentication errors.
//!
//! Implements `IntoResponse` for `AuthError` with stable, user-safe JSON
//! bodies of the shape `{ "error": "..." }`. Server-side failures are logged
//! with their raw detail here and never echoed to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = error_details(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed with server error");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Maps an error to its HTTP status and client-facing message.
fn error_details(error: &AuthError) -> (StatusCode, String) {
    match error {
        AuthError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "Incorrect password.".to_string())
        }
        AuthError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
        AuthError::DuplicateUsername => (
            StatusCode::BAD_REQUEST,
            "Username has already been taken!".to_string(),
        ),
        AuthError::Malformed => (StatusCode::UNAUTHORIZED, "Invalid session token.".to_string()),
        AuthError::Expired => (
            StatusCode::UNAUTHORIZED,
            "Session has expired. Please log in again.".to_string(),
        ),
        AuthError::Unauthenticated => {
            (StatusCode::UNAUTHORIZED, "You are not logged in.".to_string())
        }
        AuthError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        AuthError::InvalidRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AuthError::IntegrityViolation { .. }
        | AuthError::StoreUnavailable { .. }
        | AuthError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        ),
    }
}
