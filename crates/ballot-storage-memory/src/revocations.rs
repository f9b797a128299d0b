//! In-memory revocation store.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use ballot_core::{RevocationStore, StorageResult};

/// In-memory deny-list of revoked session tokens.
///
/// Maps the token exactly as issued to the expiry that was signed into it.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, OffsetDateTime>>,
}

impl InMemoryRevocationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: OffsetDateTime) -> StorageResult<()> {
        // Insert overwrites, which is what makes a repeated logout a no-op:
        // the same token always carries the same embedded expiry.
        self.entries
            .write()
            .await
            .insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> StorageResult<bool> {
        let now = OffsetDateTime::now_utc();
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                None => return Ok(false),
                Some(expires_at) if *expires_at > now => return Ok(true),
                Some(_) => {}
            }
        }
        // Stale entry: the token is already dead through its embedded
        // expiry. Drop the entry opportunistically; the answer does not
        // depend on the delete happening.
        self.entries.write().await.remove(token);
        Ok(false)
    }

    async fn sweep_expired(&self) -> StorageResult<u64> {
        let now = OffsetDateTime::now_utc();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let store = InMemoryRevocationStore::new();
        let expiry = OffsetDateTime::now_utc() + time::Duration::hours(1);

        assert!(!store.is_revoked("token-a").await.unwrap());
        store.revoke("token-a", expiry).await.unwrap();
        assert!(store.is_revoked("token-a").await.unwrap());
        // Another token is unaffected.
        assert!(!store.is_revoked("token-b").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = InMemoryRevocationStore::new();
        let expiry = OffsetDateTime::now_utc() + time::Duration::hours(1);

        store.revoke("token-a", expiry).await.unwrap();
        store.revoke("token-a", expiry).await.unwrap();
        assert!(store.is_revoked("token-a").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_stale_entry_reads_as_not_revoked() {
        let store = InMemoryRevocationStore::new();
        let past = OffsetDateTime::now_utc() - time::Duration::minutes(5);

        store.revoke("old-token", past).await.unwrap();
        assert!(!store.is_revoked("old-token").await.unwrap());
        // The lookup dropped the stale entry on the way out.
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweep_removes_exactly_the_expired() {
        let store = InMemoryRevocationStore::new();
        let now = OffsetDateTime::now_utc();

        store
            .revoke("stale-1", now - time::Duration::hours(2))
            .await
            .unwrap();
        store
            .revoke("stale-2", now - time::Duration::seconds(1))
            .await
            .unwrap();
        store
            .revoke("live-1", now + time::Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(store.sweep_expired().await.unwrap(), 2);
        assert_eq!(store.len().await, 1);
        assert!(store.is_revoked("live-1").await.unwrap());

        // Nothing left to sweep.
        assert_eq!(store.sweep_expired().await.unwrap(), 0);
    }
}
