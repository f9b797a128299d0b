//! Storage error types.
//!
//! Every storage trait in this crate reports failures through
//! [`StorageError`]. Backends wrap their driver errors into these variants so
//! that callers never see (or leak) raw driver messages.

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A unique constraint was violated (e.g. duplicate username).
    #[error("Duplicate key: {key}")]
    Duplicate {
        /// The conflicting key.
        key: String,
    },

    /// The referenced record does not exist.
    #[error("Record not found: {what}")]
    NotFound {
        /// Description of the missing record.
        what: String,
    },

    /// The underlying store failed or is unreachable.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Duplicate` error.
    #[must_use]
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::Duplicate { key: key.into() }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a unique-constraint violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::duplicate("username=alice");
        assert_eq!(err.to_string(), "Duplicate key: username=alice");
        assert!(err.is_duplicate());

        let err = StorageError::backend("connection refused");
        assert_eq!(err.to_string(), "Storage backend error: connection refused");
        assert!(!err.is_duplicate());
    }
}
