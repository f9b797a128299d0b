//! Authentication and authorization error types.
//!
//! Token validity is a tagged union, not a boolean: a presented token is
//! valid, expired/revoked, malformed, or absent, and every call site has to
//! handle all four outcomes. The variants here keep that explicit.

use ballot_core::StorageError;

/// Errors that can occur during authentication and authorization operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The password did not match the stored hash.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The referenced record (user, candidate) does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found.
        message: String,
    },

    /// Registration conflict: the username is already taken.
    #[error("Duplicate username")]
    DuplicateUsername,

    /// More than one user record matched a username that must be unique.
    /// Data corruption; surfaced, never silently resolved.
    #[error("Integrity violation: duplicate records for username {username}")]
    IntegrityViolation {
        /// The duplicated username.
        username: String,
    },

    /// The token could not be decoded or its signature is invalid.
    #[error("Malformed token")]
    Malformed,

    /// The token's signature is valid but it is time-expired or revoked.
    #[error("Session expired")]
    Expired,

    /// No token was presented with the request.
    #[error("Not logged in")]
    Unauthenticated,

    /// The authenticated user does not have permission for the action.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// The request payload failed validation.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the validation failure.
        message: String,
    },

    /// The underlying persistence call failed.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Internal description; never echoed to the client.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Internal description; never echoed to the client.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `IntegrityViolation` error.
    #[must_use]
    pub fn integrity_violation(username: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            username: username.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::IntegrityViolation { .. } | Self::StoreUnavailable { .. } | Self::Internal { .. }
        )
    }

    /// Returns `true` if this is a token-validity error.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::Malformed | Self::Expired | Self::Unauthenticated)
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { .. } => Self::DuplicateUsername,
            other => Self::StoreUnavailable {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::Expired.to_string(), "Session expired");
        assert_eq!(
            AuthError::forbidden("admin only").to_string(),
            "Forbidden: admin only"
        );
        assert_eq!(
            AuthError::integrity_violation("alice").to_string(),
            "Integrity violation: duplicate records for username alice"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(AuthError::InvalidCredentials.is_client_error());
        assert!(AuthError::Expired.is_token_error());
        assert!(!AuthError::forbidden("x").is_token_error());
        assert!(AuthError::integrity_violation("alice").is_server_error());
        assert!(
            AuthError::StoreUnavailable {
                message: "down".into()
            }
            .is_server_error()
        );
    }

    #[test]
    fn test_from_storage_error() {
        let err: AuthError = StorageError::duplicate("username=bob").into();
        assert!(matches!(err, AuthError::DuplicateUsername));

        let err: AuthError = StorageError::backend("timeout").into();
        assert!(matches!(err, AuthError::StoreUnavailable { .. }));
    }
}
