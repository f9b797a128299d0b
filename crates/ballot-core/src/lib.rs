//! Core domain types and storage traits for the ballot server.
//!
//! This crate defines the shared vocabulary of the voting backend: user and
//! candidate records, the revocation-entry model for logged-out session
//! tokens, and the async storage traits that backends implement. It contains
//! no I/O of its own.

pub mod error;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use storage::candidate::{Candidate, CandidateStorage, NewCandidate};
pub use storage::image::ImageStore;
pub use storage::revocation::RevocationStore;
pub use storage::user::{NewUser, Role, User, UserStorage};
