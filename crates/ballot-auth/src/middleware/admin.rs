//! Administrator gate.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Json, Router, routing::post};
//! use ballot_auth::middleware::AdminAuth;
//!
//! async fn admin_handler(admin: AdminAuth) -> Json<String> {
//!     Json(format!("Hello admin: {}!", admin.user.username))
//! }
//!
//! let app = Router::new()
//!     .route("/candidate", post(admin_handler))
//!     .with_state(state);
//! ```

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use ballot_core::User;

use crate::error::AuthError;

use super::auth::{AuthState, SessionAuth, SessionContext};

// =============================================================================
// Admin Auth Extractor
// =============================================================================

/// Axum extractor that validates the session token and requires the admin
/// role on the **current** user record.
///
/// The role claim frozen into the token at login is deliberately ignored: a
/// user demoted after login loses admin access on their next request, not at
/// token expiry. A token whose user record has since been deleted is treated
/// the same as an ordinary user's.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// The freshly loaded user record.
    pub user: User,
    /// The validated session.
    pub session: SessionContext,
}

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionAuth(session) = SessionAuth::from_request_parts(parts, state).await?;
        let auth_state = AuthState::from_ref(state);

        let user = auth_state
            .users
            .find_by_id(session.claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = session.claims.sub,
                    "valid token for a user that no longer exists"
                );
                AuthError::forbidden("User does not have admin role")
            })?;

        if !user.is_admin() {
            tracing::debug!(
                user_id = user.id,
                username = %user.username,
                "admin access denied for ordinary user"
            );
            return Err(AuthError::forbidden("User does not have admin role"));
        }

        tracing::debug!(user_id = user.id, username = %user.username, "admin access granted");
        Ok(Self { user, session })
    }
}
