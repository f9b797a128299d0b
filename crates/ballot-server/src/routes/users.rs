//! User read and voting handlers. All ordinary-gated.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use ballot_auth::AuthError;
use ballot_auth::middleware::SessionAuth;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct VoteRequest {
    candidate_id: i64,
}

/// `GET /user/{id}` — fetches a user record.
pub(crate) async fn get_user(
    State(state): State<AppState>,
    SessionAuth(_session): SessionAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AuthError> {
    let user = state
        .auth
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("User not found"))?;

    Ok(Json(json!({ "user": user })))
}

/// `GET /user/{id}/vote` — the candidate a user currently votes for.
pub(crate) async fn get_user_vote(
    State(state): State<AppState>,
    SessionAuth(_session): SessionAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AuthError> {
    let user = state
        .auth
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("User not found"))?;

    Ok(Json(json!({
        "user_id": user.id,
        "candidate_voted_id": user.candidate_voted_id,
    })))
}

/// `POST /user/vote` — records the caller's vote.
///
/// A re-vote replaces the previous choice. The candidate must exist at the
/// moment of voting; votes for since-deleted candidates simply drop out of
/// the tally.
pub(crate) async fn vote(
    State(state): State<AppState>,
    SessionAuth(session): SessionAuth,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Value>, AuthError> {
    state
        .candidates
        .find_by_id(req.candidate_id)
        .await?
        .ok_or_else(|| AuthError::not_found("Candidate not found"))?;

    state
        .auth
        .users
        .record_vote(session.user_id(), req.candidate_id)
        .await?;

    tracing::info!(
        user_id = session.user_id(),
        candidate_id = req.candidate_id,
        "vote recorded"
    );
    Ok(Json(json!({ "message": "Vote recorded." })))
}
