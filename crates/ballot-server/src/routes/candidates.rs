//! Candidate handlers. Reads are ordinary-gated, writes admin-gated.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use serde::Deserialize;
use serde_json::{Value, json};

use ballot_auth::AuthError;
use ballot_auth::middleware::{AdminAuth, SessionAuth};
use ballot_core::{Candidate, NewCandidate};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateCandidateRequest {
    name: String,
    age: u32,
    message: String,
}

/// `GET /candidate/all` — lists all candidates.
pub(crate) async fn list(
    State(state): State<AppState>,
    SessionAuth(_session): SessionAuth,
) -> Result<Json<Value>, AuthError> {
    let candidates = state.candidates.list_all().await?;
    Ok(Json(json!({ "candidates": candidates })))
}

/// `GET /candidate/{id}` — fetches one candidate.
pub(crate) async fn get_candidate(
    State(state): State<AppState>,
    SessionAuth(_session): SessionAuth,
    Path(id): Path<i64>,
) -> Result<Json<Candidate>, AuthError> {
    let candidate = state
        .candidates
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("Candidate not found"))?;
    Ok(Json(candidate))
}

/// `POST /candidate` — creates a candidate.
pub(crate) async fn create(
    State(state): State<AppState>,
    admin: AdminAuth,
    Json(req): Json<NewCandidate>,
) -> Result<(StatusCode, Json<Candidate>), AuthError> {
    if req.name.trim().is_empty() {
        return Err(AuthError::invalid_request("Candidate name must not be empty."));
    }

    let candidate = state.candidates.create(req).await?;
    tracing::info!(
        candidate_id = candidate.id,
        admin = %admin.user.username,
        "candidate created"
    );
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// `PUT /candidate/{id}` — replaces a candidate's details.
///
/// Image fields are managed through the image endpoint and survive the
/// update untouched.
pub(crate) async fn update(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCandidateRequest>,
) -> Result<Json<Candidate>, AuthError> {
    let existing = state
        .candidates
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("Candidate not found"))?;

    let updated = state
        .candidates
        .update(Candidate {
            id,
            name: req.name,
            age: req.age,
            message: req.message,
            image_key: existing.image_key,
            image_url: existing.image_url,
        })
        .await?;

    Ok(Json(updated))
}

/// `DELETE /candidate/{id}` — deletes a candidate and, best-effort, its
/// image asset.
pub(crate) async fn delete(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AuthError> {
    let deleted = state.candidates.delete(id).await.map_err(|e| {
        if matches!(e, ballot_core::StorageError::NotFound { .. }) {
            AuthError::not_found("Candidate not found")
        } else {
            e.into()
        }
    })?;

    if let Some(key) = &deleted.image_key {
        // The record is already gone; a dangling object is not worth a 500.
        if let Err(e) = state.images.delete(key).await {
            tracing::warn!(candidate_id = id, key = %key, error = %e, "image cleanup failed");
        }
    }

    tracing::info!(
        candidate_id = id,
        admin = %admin.user.username,
        "candidate deleted"
    );
    Ok(Json(json!({ "message": "Candidate deleted." })))
}

/// `PUT /candidate/{id}/image` — stores the candidate's portrait.
///
/// Takes the raw image bytes as the request body; the content type comes
/// from the `Content-Type` header. Replacing a portrait deletes the old
/// object best-effort.
pub(crate) async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Candidate>, AuthError> {
    if body.is_empty() {
        return Err(AuthError::invalid_request("Image payload is empty."));
    }

    let candidate = state
        .candidates
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("Candidate not found"))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let key = format!("candidates/{id}-{}", uuid::Uuid::new_v4());
    let url = state.images.put(&key, body.to_vec(), &content_type).await?;

    if let Some(old_key) = &candidate.image_key {
        if let Err(e) = state.images.delete(old_key).await {
            tracing::warn!(candidate_id = id, key = %old_key, error = %e, "stale image cleanup failed");
        }
    }

    let updated = state
        .candidates
        .update(Candidate {
            image_key: Some(key),
            image_url: Some(url),
            ..candidate
        })
        .await?;

    Ok(Json(updated))
}
