//! In-memory user storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use ballot_core::{NewUser, StorageError, StorageResult, User, UserStorage};

/// In-memory user store keyed by numeric id.
#[derive(Default)]
pub struct InMemoryUserStorage {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a record as-is, bypassing the uniqueness check and the id
    /// sequence. Test and seeding hook; lets suites construct states the
    /// public API forbids, such as duplicate usernames.
    pub async fn insert_raw(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStorage for InMemoryUserStorage {
    async fn find_by_username(&self, username: &str) -> StorageResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.username == username)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, user_id: i64) -> StorageResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn create(&self, user: NewUser) -> StorageResult<User> {
        let mut users = self.users.write().await;
        // Uniqueness check and insert under the same write lock.
        if users.values().any(|u| u.username == user.username) {
            return Err(StorageError::duplicate(format!(
                "username={}",
                user.username
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            fingerprint_id: user.fingerprint_id,
            sensor_id: user.sensor_id,
            candidate_voted_id: None,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(id, record.clone());
        Ok(record)
    }

    async fn record_vote(&self, user_id: i64, candidate_id: i64) -> StorageResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| StorageError::not_found(format!("user {user_id}")))?;
        user.candidate_voted_id = Some(candidate_id);
        Ok(())
    }

    async fn find_voters(&self) -> StorageResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.has_voted()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_core::Role;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Voter,
            fingerprint_id: 5,
            sensor_id: 1,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryUserStorage::new();
        let a = store.create(new_user("alice01")).await.unwrap();
        let b = store.create(new_user("bob-two")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.candidate_voted_id.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStorage::new();
        store.create(new_user("alice01")).await.unwrap();

        let err = store.create(new_user("alice01")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_username_returns_all_matches() {
        let store = InMemoryUserStorage::new();
        let created = store.create(new_user("alice01")).await.unwrap();

        // Seed a duplicate behind the uniqueness check.
        let mut dup = created.clone();
        dup.id = 999;
        store.insert_raw(dup).await;

        let matches = store.find_by_username("alice01").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert!(store.find_by_username("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_vote_and_find_voters() {
        let store = InMemoryUserStorage::new();
        let alice = store.create(new_user("alice01")).await.unwrap();
        store.create(new_user("bob-two")).await.unwrap();

        store.record_vote(alice.id, 7).await.unwrap();
        let voters = store.find_voters().await.unwrap();
        assert_eq!(voters.len(), 1);
        assert_eq!(voters[0].candidate_voted_id, Some(7));

        // A re-vote replaces the previous choice.
        store.record_vote(alice.id, 9).await.unwrap();
        let voters = store.find_voters().await.unwrap();
        assert_eq!(voters.len(), 1);
        assert_eq!(voters[0].candidate_voted_id, Some(9));
    }

    #[tokio::test]
    async fn test_record_vote_unknown_user() {
        let store = InMemoryUserStorage::new();
        let err = store.record_vote(42, 1).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
