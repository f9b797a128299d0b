//! Candidate record and storage trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::StorageResult;

/// A candidate standing for election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique numeric identifier, assigned on creation.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Age in years.
    pub age: u32,

    /// Campaign message shown to voters.
    pub message: String,

    /// Object-storage key of the portrait image, if one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,

    /// Public URL of the portrait image, if one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Input for creating a candidate; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Campaign message.
    pub message: String,
}

/// Storage operations for candidate records.
#[async_trait]
pub trait CandidateStorage: Send + Sync {
    /// Finds a candidate by id. Returns `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, candidate_id: i64) -> StorageResult<Option<Candidate>>;

    /// Returns all candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_all(&self) -> StorageResult<Vec<Candidate>>;

    /// Creates a candidate, assigning the next numeric id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn create(&self, candidate: NewCandidate) -> StorageResult<Candidate>;

    /// Replaces an existing candidate record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if the candidate does not
    /// exist, or another error if the storage operation fails.
    async fn update(&self, candidate: Candidate) -> StorageResult<Candidate>;

    /// Deletes a candidate. Returns the deleted record so the caller can
    /// clean up its image asset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if the candidate does not
    /// exist, or another error if the storage operation fails.
    async fn delete(&self, candidate_id: i64) -> StorageResult<Candidate>;
}
