//! User record and credential-store trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::StorageResult;

fn default_datetime() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role of a user.
///
/// Fixed at registration; there is no promotion path through the public API.
/// Administrators are seeded out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary voter.
    Voter,
    /// Administrator with access to candidate management.
    Admin,
}

impl Role {
    /// Returns `true` for the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the role name as used in token claims.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voter => "voter",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered voter or administrator.
///
/// The numeric id is assigned by the store on creation and the username is
/// immutable afterwards. `password_hash` is an opaque PHC string and must be
/// filtered out of any API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric identifier, assigned on creation.
    pub id: i64,

    /// Unique username used for login.
    pub username: String,

    /// Argon2 PHC hash of the password. Never exposed outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Authorization role, fixed at creation.
    pub role: Role,

    /// Fingerprint slot on the enrollment sensor (0..=161).
    pub fingerprint_id: i64,

    /// Identifier of the biometric sensor the user enrolled on.
    pub sensor_id: i64,

    /// Candidate this user currently votes for, if any.
    pub candidate_voted_id: Option<i64>,

    /// When the user registered.
    #[serde(default = "default_datetime", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Returns `true` if the user holds the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns `true` if the user has recorded a vote.
    #[must_use]
    pub fn has_voted(&self) -> bool {
        self.candidate_voted_id.is_some()
    }
}

/// Input for creating a user; the store assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
    /// Fingerprint slot on the enrollment sensor.
    pub fingerprint_id: i64,
    /// Identifier of the biometric sensor.
    pub sensor_id: i64,
}

// =============================================================================
// User Storage Trait
// =============================================================================

/// Storage operations for user records.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Finds every user with the given username.
    ///
    /// Usernames are unique by construction, so more than one match is a
    /// data-integrity violation. The full list is returned so callers can
    /// observe (and surface) that condition instead of having it silently
    /// resolved here.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_username(&self, username: &str) -> StorageResult<Vec<User>>;

    /// Finds a user by numeric id. Returns `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, user_id: i64) -> StorageResult<Option<User>>;

    /// Creates a user, assigning the next numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Duplicate`] if the username is taken,
    /// or another error if the storage operation fails.
    async fn create(&self, user: NewUser) -> StorageResult<User>;

    /// Records (or replaces) the user's vote for a candidate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if the user does not exist,
    /// or another error if the storage operation fails.
    async fn record_vote(&self, user_id: i64, candidate_id: i64) -> StorageResult<()>;

    /// Returns every user with a recorded vote. Tally input.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_voters(&self) -> StorageResult<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Voter.is_admin());
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Voter.to_string(), "voter");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Voter).unwrap(), "\"voter\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_user_predicates() {
        let user = User {
            id: 1,
            username: "someVoter".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Voter,
            fingerprint_id: 7,
            sensor_id: 2,
            candidate_voted_id: None,
            created_at: OffsetDateTime::now_utc(),
        };
        assert!(!user.is_admin());
        assert!(!user.has_voted());

        let voted = User {
            candidate_voted_id: Some(3),
            ..user
        };
        assert!(voted.has_voted());
    }
}
