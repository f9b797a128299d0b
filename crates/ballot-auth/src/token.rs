//! Session token issuance and decoding.
//!
//! Tokens are compact JWTs signed with HS256 using a server-held secret.
//! They embed the subject's id, username and role, plus issued-at/expires-at
//! timestamps; the default lifetime is one hour from issuance.
//!
//! [`TokenService::decode`] verifies signature and structure only. Expiry and
//! revocation are checked by the session validator in
//! [`crate::middleware`] — kept separate so callers that need raw claims
//! (logout builds its revocation entry from the embedded expiry) do not pay
//! for the full validation pipeline twice.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use ballot_core::{Role, User, UserStorage};

use crate::{AuthError, AuthResult};

/// Default session lifetime: one hour from issuance.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

// =============================================================================
// Claims
// =============================================================================

/// Claim set embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject: the user's numeric id.
    pub sub: i64,

    /// Username at issuance.
    pub username: String,

    /// Role at issuance. The admin gate re-checks the live record instead of
    /// trusting this frozen claim.
    pub role: Role,

    /// Unique token id; two logins for the same account yield two distinct
    /// tokens even within the same second.
    pub jti: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns `true` if the embedded expiry is before `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.exp < now.unix_timestamp()
    }

    /// Returns the embedded expiry as an `OffsetDateTime`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp is out of the representable range,
    /// which cannot happen for a token this service issued.
    pub fn expires_at(&self) -> AuthResult<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.exp)
            .map_err(|e| AuthError::internal(format!("invalid expiry timestamp: {e}")))
    }
}

/// A freshly issued token together with the claims that were signed into it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed compact token.
    pub token: String,
    /// The claims embedded in it.
    pub claims: SessionClaims,
}

// =============================================================================
// Token Service
// =============================================================================

/// Issues and decodes session tokens.
///
/// Constructed once at startup from the process-wide signing secret; absence
/// of the secret is a fatal startup condition handled by configuration
/// loading, not by this type. Thread-safe and shared across request tasks.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Creates a new token service from the signing secret.
    #[must_use]
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Creates a token service with the default one-hour lifetime.
    #[must_use]
    pub fn with_default_lifetime(secret: &str) -> Self {
        Self::new(secret, DEFAULT_TOKEN_LIFETIME)
    }

    /// Returns the configured session lifetime.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Verifies credentials and mints a session token.
    ///
    /// Stateless: the only side effect is the credential-store lookup.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] if no user has this username
    /// - [`AuthError::IntegrityViolation`] if more than one record matches
    ///   (usernames must be unique; this is surfaced, never silently picked)
    /// - [`AuthError::InvalidCredentials`] if the password does not match
    /// - [`AuthError::StoreUnavailable`] if the lookup fails
    pub async fn issue(
        &self,
        users: &dyn UserStorage,
        username: &str,
        password: &str,
    ) -> AuthResult<IssuedToken> {
        let matches = users.find_by_username(username).await?;
        let user = match matches.as_slice() {
            [] => {
                tracing::debug!(username = %username, "login for unknown username");
                return Err(AuthError::not_found("Username not found"));
            }
            [user] => user,
            _ => {
                tracing::error!(
                    username = %username,
                    count = matches.len(),
                    "duplicate user records for a unique username"
                );
                return Err(AuthError::integrity_violation(username));
            }
        };

        let password_matches = crate::password::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::internal(format!("stored password hash unreadable: {e}")))?;
        if !password_matches {
            tracing::debug!(username = %username, "login with incorrect password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.issue_for_user(user)?;
        tracing::info!(username = %username, user_id = user.id, "session token issued");
        Ok(issued)
    }

    /// Mints a session token for an already-verified user.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue_for_user(&self, user: &User) -> AuthResult<IssuedToken> {
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        // A lifetime beyond i64 seconds saturates rather than wrapping into
        // a past expiry.
        let lifetime_secs = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            jti: uuid::Uuid::new_v4().to_string(),
            iat,
            exp: iat.saturating_add(lifetime_secs),
        };
        let token = self.encode(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Signs a claim set into a compact token.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn encode(&self, claims: &SessionClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("failed to sign token: {e}")))
    }

    /// Decodes a token, verifying signature and structure only.
    ///
    /// Expiry and revocation are deliberately not checked here; that is the
    /// session validator's job.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`] if the token cannot be parsed or its
    /// signature does not verify.
    pub fn decode(&self, token: &str) -> AuthResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "failed to decode session token");
                AuthError::Malformed
            })
    }
}

// =============================================================================
// Tests
// =============================================================================
