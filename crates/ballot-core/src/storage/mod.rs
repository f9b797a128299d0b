//! Storage traits for the ballot server.
//!
//! Each submodule pairs a domain type with the async trait a backend
//! implements for it. Implementations are provided in separate crates
//! (`ballot-storage-memory` ships the in-memory backend used by the default
//! server wiring and by tests).

pub mod candidate;
pub mod image;
pub mod revocation;
pub mod user;
