//! Background garbage collection of revocation entries.
//!
//! Revocation entries become dead weight once the token they name is past
//! its embedded expiry: the stateless expiry check already rejects such
//! tokens, so the entries only consume space. The sweeper deletes them on a
//! fixed timer. Correctness never depends on it running; lookup treats a
//! stale entry as "not revoked" regardless.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use ballot_core::RevocationStore;

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Spawns the revocation sweeper on the given interval.
///
/// The first sweep runs after one full interval, not immediately. Sweep
/// failures are logged and the loop continues; the next tick retries.
/// Dropping the returned handle does not stop the task; call
/// [`JoinHandle::abort`] on shutdown if needed.
pub fn spawn_revocation_sweeper(
    revocations: Arc<dyn RevocationStore>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires immediately on the first tick; consume it so the
        // first sweep happens one full interval after startup.
        ticker.tick().await;

        tracing::info!(interval_secs = interval.as_secs(), "revocation sweeper started");
        loop {
            ticker.tick().await;
            match revocations.sweep_expired().await {
                Ok(0) => {
                    tracing::trace!("revocation sweep found nothing to remove");
                }
                Ok(removed) => {
                    tracing::debug!(removed, "revocation sweep removed expired entries");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "revocation sweep failed; will retry next tick");
                }
            }
        }
    })
}
