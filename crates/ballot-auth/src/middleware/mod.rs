//! Request gates for protected routes.
//!
//! [`SessionAuth`] validates the presented session token (signature, expiry,
//! revocation) and is the gate for ordinary-user routes. [`AdminAuth`] runs
//! the same validation and then checks the **live** user record for the
//! admin role, so a demotion takes effect on the next request rather than at
//! token expiry.

mod admin;
mod auth;
mod error;

pub use admin::AdminAuth;
pub use auth::{AuthState, SessionAuth, SessionContext};
