//! Registration, login and logout handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use ballot_auth::middleware::SessionAuth;
use ballot_auth::{AuthError, password, validation};
use ballot_core::{NewUser, Role};

use crate::state::AppState;

/// Highest fingerprint slot on the enrollment sensor.
const MAX_FINGERPRINT_ID: i64 = 161;

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    username: String,
    password: String,
    fingerprint_id: i64,
    sensor_id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    username: String,
    password: String,
}

/// `POST /register` — creates a voter account.
///
/// Every account created here is an ordinary voter; administrators are
/// seeded out of band.
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, AuthError> {
    if !validation::username_is_valid(&req.username) {
        return Err(AuthError::invalid_request(
            "Username must be 4-20 characters (letters, digits, '_', '-') and must not start with a digit or underscore.",
        ));
    }
    if !validation::password_is_valid(&req.password) {
        return Err(AuthError::invalid_request(
            "Password must be 8-20 characters with at least one uppercase letter, one lowercase letter, one digit and one special character.",
        ));
    }
    if !(0..=MAX_FINGERPRINT_ID).contains(&req.fingerprint_id) {
        return Err(AuthError::invalid_request(
            "Fingerprint id must be between 0 and 161.",
        ));
    }
    if req.sensor_id < 0 {
        return Err(AuthError::invalid_request("Sensor id must not be negative."));
    }

    let password_hash = password::hash_password(&req.password)
        .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;

    let user = state
        .auth
        .users
        .create(NewUser {
            username: req.username,
            password_hash,
            role: Role::Voter,
            fingerprint_id: req.fingerprint_id,
            sensor_id: req.sensor_id,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(json!({
        "message": "Registration successful.",
        "user": user,
    })))
}

/// `POST /login` — verifies credentials and returns a session token.
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AuthError> {
    let issued = state
        .auth
        .tokens
        .issue(state.auth.users.as_ref(), &req.username, &req.password)
        .await?;

    Ok(Json(json!({ "token": issued.token })))
}

/// `POST /logout` — revokes the presented token until its natural expiry.
///
/// The gate has already validated the token, so the revocation entry is
/// built from the session context directly. Logging out twice succeeds;
/// `revoke` is idempotent.
pub(crate) async fn logout(
    State(state): State<AppState>,
    SessionAuth(session): SessionAuth,
) -> Result<Json<Value>, AuthError> {
    let expires_at = session.claims.expires_at()?;
    state
        .auth
        .revocations
        .revoke(&session.token, expires_at)
        .await?;

    tracing::info!(user_id = session.user_id(), "session revoked");
    Ok(Json(json!({ "message": "Logout successful." })))
}
