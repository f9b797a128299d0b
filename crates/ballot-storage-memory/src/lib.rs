//! In-memory implementations of the ballot storage traits.
//!
//! Backed by `tokio::sync::RwLock`-guarded maps with atomic id sequences.
//! Used by the default server wiring and throughout the test suites. All
//! data is lost on process exit.

mod candidates;
mod images;
mod revocations;
mod users;

pub use candidates::InMemoryCandidateStorage;
pub use images::InMemoryImageStore;
pub use revocations::InMemoryRevocationStore;
pub use users::InMemoryUserStorage;
