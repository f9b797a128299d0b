//! Authentication and authorization for the ballot server.
//!
//! Session tokens are stateless JWTs signed with a server-held secret and
//! valid for a fixed lifetime. Logout layers a server-side revocation store
//! on top, so a presented token is valid only when **both** racing sources of
//! truth agree: the signature/expiry embedded in the token, and the absence
//! of an unexpired revocation entry.
//!
//! The crate provides:
//!
//! - [`token::TokenService`] — issues and decodes session tokens
//! - [`middleware::SessionAuth`] — the ordinary-user request gate
//! - [`middleware::AdminAuth`] — the administrator request gate
//! - [`sweeper::spawn_revocation_sweeper`] — background garbage collection
//!   of revocation entries whose token has naturally expired
//! - [`password`] — Argon2id password hashing
//! - [`validation`] — username/password registration rules

pub mod error;
pub mod middleware;
pub mod password;
pub mod sweeper;
pub mod token;
pub mod validation;

pub use error::AuthError;

/// Result alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
