//! In-memory candidate storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use ballot_core::{Candidate, CandidateStorage, NewCandidate, StorageError, StorageResult};

/// In-memory candidate store keyed by numeric id.
#[derive(Default)]
pub struct InMemoryCandidateStorage {
    candidates: RwLock<HashMap<i64, Candidate>>,
    next_id: AtomicI64,
}

impl InMemoryCandidateStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidates: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CandidateStorage for InMemoryCandidateStorage {
    async fn find_by_id(&self, candidate_id: i64) -> StorageResult<Option<Candidate>> {
        Ok(self.candidates.read().await.get(&candidate_id).cloned())
    }

    async fn list_all(&self) -> StorageResult<Vec<Candidate>> {
        Ok(self.candidates.read().await.values().cloned().collect())
    }

    async fn create(&self, candidate: NewCandidate) -> StorageResult<Candidate> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = Candidate {
            id,
            name: candidate.name,
            age: candidate.age,
            message: candidate.message,
            image_key: None,
            image_url: None,
        };
        self.candidates.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, candidate: Candidate) -> StorageResult<Candidate> {
        let mut candidates = self.candidates.write().await;
        if !candidates.contains_key(&candidate.id) {
            return Err(StorageError::not_found(format!(
                "candidate {}",
                candidate.id
            )));
        }
        candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn delete(&self, candidate_id: i64) -> StorageResult<Candidate> {
        self.candidates
            .write()
            .await
            .remove(&candidate_id)
            .ok_or_else(|| StorageError::not_found(format!("candidate {candidate_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_candidate(name: &str) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            age: 45,
            message: "A vote for progress".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = InMemoryCandidateStorage::new();
        let a = store.create(new_candidate("Ada")).await.unwrap();
        let b = store.create(new_candidate("Grace")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.image_key.is_none());
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let store = InMemoryCandidateStorage::new();
        let mut candidate = store.create(new_candidate("Ada")).await.unwrap();

        candidate.message = "New platform".to_string();
        candidate.image_key = Some("candidates/1.png".to_string());
        let updated = store.update(candidate).await.unwrap();
        assert_eq!(updated.message, "New platform");

        let fetched = store.find_by_id(updated.id).await.unwrap().unwrap();
        assert_eq!(fetched.image_key.as_deref(), Some("candidates/1.png"));
    }

    #[tokio::test]
    async fn test_update_unknown_candidate() {
        let store = InMemoryCandidateStorage::new();
        let ghost = Candidate {
            id: 42,
            name: "Ghost".to_string(),
            age: 30,
            message: String::new(),
            image_key: None,
            image_url: None,
        };
        let err = store.update(ghost).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_returns_record() {
        let store = InMemoryCandidateStorage::new();
        let candidate = store.create(new_candidate("Ada")).await.unwrap();

        let deleted = store.delete(candidate.id).await.unwrap();
        assert_eq!(deleted.name, "Ada");
        assert!(store.find_by_id(candidate.id).await.unwrap().is_none());

        let err = store.delete(candidate.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
