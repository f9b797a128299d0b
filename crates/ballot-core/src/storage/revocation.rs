//! Revocation store trait for logged-out session tokens.
//!
//! Session tokens are stateless: their validity is derived from signature and
//! embedded expiry. Logout layers an explicit deny-list on top. An entry is
//! keyed by the token exactly as it was issued and carries the expiry that
//! was signed into the token, which is what lets the sweeper discard entries
//! whose underlying token could no longer be replayed anyway, without
//! re-parsing or re-verifying the token.
//!
//! Sweeping is hygiene, not correctness: the session validator checks the
//! embedded expiry itself, so an expired-but-unswept entry is harmless.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::StorageResult;

/// Storage trait for revoked session tokens.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks a token as revoked until its natural expiry.
    ///
    /// `expires_at` must be the expiry that was signed into the token.
    ///
    /// # Idempotency
    ///
    /// Revoking an already-revoked token is a no-op success; logging out
    /// twice must never fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn revoke(&self, token: &str, expires_at: OffsetDateTime) -> StorageResult<()>;

    /// Checks whether a token has been revoked.
    ///
    /// Absent ⇒ `false`. Present with a stored expiry already in the past ⇒
    /// `false` — a stale entry cannot extend the life of an already-dead
    /// token. Implementations may opportunistically delete such an entry but
    /// must not require the delete to return the correct answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn is_revoked(&self, token: &str) -> StorageResult<bool>;

    /// Deletes every entry whose expiry is in the past.
    ///
    /// Returns the number of entries removed. A failure to delete one entry
    /// is logged by the implementation and does not abort the remaining
    /// deletions.
    ///
    /// # Errors
    ///
    /// Returns an error only if the scan itself fails.
    async fn sweep_expired(&self) -> StorageResult<u64>;
}
