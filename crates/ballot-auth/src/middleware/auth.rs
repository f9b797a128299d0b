//! Session token validation extractor.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::post};
//! use ballot_auth::middleware::SessionAuth;
//!
//! async fn protected_handler(SessionAuth(session): SessionAuth) -> String {
//!     format!("Hello, {}!", session.claims.username)
//! }
//!
//! let app = Router::new()
//!     .route("/logout", post(protected_handler))
//!     .with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use time::OffsetDateTime;

use ballot_core::{RevocationStore, UserStorage};

use crate::error::AuthError;
use crate::token::{SessionClaims, TokenService};

// =============================================================================
// Auth State
// =============================================================================

/// State required by the session gates.
///
/// Include this in your application state and expose it to the extractors
/// via `FromRef`.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct AppState {
///     auth: AuthState,
///     // ... other state
/// }
///
/// impl FromRef<AppState> for AuthState {
///     fn from_ref(state: &AppState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthState {
    /// Token service for decoding session tokens.
    pub tokens: Arc<TokenService>,

    /// User storage for the live admin-role lookup.
    pub users: Arc<dyn UserStorage>,

    /// Revocation store consulted on every gated request.
    pub revocations: Arc<dyn RevocationStore>,

    /// When set, each gate check first sweeps expired revocation entries
    /// inline. The background sweeper makes this redundant; it exists for
    /// deployments that run without one.
    pub sweep_on_check: bool,
}

impl AuthState {
    /// Creates a new auth state with inline sweeping disabled.
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStorage>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        Self {
            tokens,
            users,
            revocations,
            sweep_on_check: false,
        }
    }

    /// Enables or disables inline sweeping on each gate check.
    #[must_use]
    pub fn with_sweep_on_check(mut self, sweep_on_check: bool) -> Self {
        self.sweep_on_check = sweep_on_check;
        self
    }
}

// =============================================================================
// Session Context
// =============================================================================

/// The validated session attached to a request.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Decoded claims.
    pub claims: SessionClaims,
    /// The token exactly as presented; revocation is keyed on it.
    pub token: String,
}

impl SessionContext {
    /// The authenticated user's id.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.claims.sub
    }
}

// =============================================================================
// Session Auth Extractor
// =============================================================================

/// Axum extractor that validates the session token on a request.
///
/// This extractor:
/// 1. Extracts the bearer token from the `Authorization` header
/// 2. Decodes it and verifies the signature
/// 3. Checks the revocation store for an unexpired entry naming this token
/// 4. Checks the embedded expiry
///
/// A token is let through only when both sources of truth agree: the
/// signature/expiry embedded in the token, and the absence of an unexpired
/// revocation entry.
///
/// # Errors
///
/// Returns `AuthError` (which implements `IntoResponse`) if:
/// - the `Authorization: Bearer <token>` header is absent, lacks the
///   `Bearer ` scheme, is empty, or carries the literal string `null`
///   ([`AuthError::Unauthenticated`]) — clients that log out clear their
///   stored token to `null` and send it anyway
/// - the token cannot be decoded ([`AuthError::Malformed`])
/// - the token is revoked or past its expiry ([`AuthError::Expired`])
pub struct SessionAuth(pub SessionContext);

impl<S> FromRequestParts<S> for SessionAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = bearer_token(parts).ok_or(AuthError::Unauthenticated)?;
        let claims = auth_state.tokens.decode(&token)?;

        if auth_state.sweep_on_check {
            // Hygiene only; a failed sweep never blocks the request.
            if let Err(e) = auth_state.revocations.sweep_expired().await {
                tracing::warn!(error = %e, "inline revocation sweep failed");
            }
        }

        if auth_state.revocations.is_revoked(&token).await? {
            tracing::debug!(user_id = claims.sub, "revoked token presented");
            return Err(AuthError::Expired);
        }

        if claims.is_expired(OffsetDateTime::now_utc()) {
            tracing::debug!(user_id = claims.sub, "expired token presented");
            return Err(AuthError::Expired);
        }

        Ok(SessionAuth(SessionContext { claims, token }))
    }
}

/// Pulls the bearer token out of the `Authorization` header.
///
/// Returns `None` for an absent header, a header without the `Bearer `
/// scheme, an empty value, or the literal `null`.
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() || token == "null" {
        return None;
    }
    Some(token.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use ballot_core::Role;
    use ballot_storage_memory::{InMemoryRevocationStore, InMemoryUserStorage};

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/logout")
            .header(AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        // A scheme-less header is "no token", not a token.
        let parts = parts_with_auth("abc.def.ghi");
        assert_eq!(bearer_token(&parts), None);

        let parts = parts_with_auth("Basic abc.def.ghi");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_null_and_empty() {
        let parts = parts_with_auth("null");
        assert_eq!(bearer_token(&parts), None);

        let parts = parts_with_auth("Bearer null");
        assert_eq!(bearer_token(&parts), None);

        let parts = parts_with_auth("Bearer ");
        assert_eq!(bearer_token(&parts), None);

        let (parts, ()) = Request::builder()
            .uri("/logout")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), None);
    }

    fn state_with_revocations(
        revocations: std::sync::Arc<InMemoryRevocationStore>,
        sweep_on_check: bool,
    ) -> (AuthState, String) {
        let tokens = Arc::new(TokenService::with_default_lifetime("test-secret"));
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            sub: 1,
            username: "alice01".to_string(),
            role: Role::Voter,
            jti: uuid::Uuid::new_v4().to_string(),
            iat,
            exp: iat + 3600,
        };
        let token = tokens.encode(&claims).unwrap();

        let state = AuthState::new(
            tokens,
            Arc::new(InMemoryUserStorage::new()),
            revocations as Arc<dyn RevocationStore>,
        )
        .with_sweep_on_check(sweep_on_check);
        (state, token)
    }

    #[tokio::test]
    async fn test_inline_sweep_clears_stale_entries() {
        let revocations = Arc::new(InMemoryRevocationStore::new());
        let now = OffsetDateTime::now_utc();
        revocations
            .revoke("dead-token", now - time::Duration::hours(1))
            .await
            .unwrap();
        revocations
            .revoke("live-token", now + time::Duration::hours(1))
            .await
            .unwrap();

        let (state, token) = state_with_revocations(Arc::clone(&revocations), true);

        let mut parts = parts_with_auth(&format!("Bearer {token}"));
        let SessionAuth(session) = SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(session.claims.sub, 1);

        // The stale entry was swept on the way through; the live one stays.
        assert_eq!(revocations.len().await, 1);
        assert!(revocations.is_revoked("live-token").await.unwrap());
    }

    #[tokio::test]
    async fn test_no_inline_sweep_without_flag() {
        let revocations = Arc::new(InMemoryRevocationStore::new());
        revocations
            .revoke(
                "dead-token",
                OffsetDateTime::now_utc() - time::Duration::hours(1),
            )
            .await
            .unwrap();

        let (state, token) = state_with_revocations(Arc::clone(&revocations), false);

        let mut parts = parts_with_auth(&format!("Bearer {token}"));
        SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();

        // The stale entry is harmless and stays until the sweeper runs.
        assert_eq!(revocations.len().await, 1);
    }
}
