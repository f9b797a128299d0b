//! Election result handlers. Public.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::{Value, json};

use ballot_auth::AuthError;
use ballot_core::Candidate;

use crate::state::AppState;

/// Per-candidate tally line.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct CandidateTally {
    pub id: i64,
    pub name: String,
    pub votes: u64,
    /// Share of all recorded votes, two decimals with a trailing `%`.
    pub percentage: String,
}

/// `GET /results/all` — the full tally, sorted by candidate name.
pub(crate) async fn all(State(state): State<AppState>) -> Result<Json<Value>, AuthError> {
    let candidates = state.candidates.list_all().await?;
    let counts = vote_counts(&state).await?;
    let total: u64 = counts.values().sum();

    let mut results: Vec<CandidateTally> = candidates
        .into_iter()
        .map(|c| tally_line(&c, &counts, total))
        .collect();
    results.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(json!({ "total_votes": total, "results": results })))
}

/// `GET /results/candidate/{id}` — the tally for one candidate.
pub(crate) async fn for_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CandidateTally>, AuthError> {
    let candidate = state
        .candidates
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::not_found("Candidate not found"))?;

    let counts = vote_counts(&state).await?;
    let total: u64 = counts.values().sum();
    Ok(Json(tally_line(&candidate, &counts, total)))
}

/// Counts recorded votes per candidate id.
///
/// Votes referencing candidates that have since been deleted still count
/// toward the total; they just have no line to appear on.
async fn vote_counts(state: &AppState) -> Result<HashMap<i64, u64>, AuthError> {
    let voters = state.auth.users.find_voters().await?;
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for voter in voters {
        if let Some(candidate_id) = voter.candidate_voted_id {
            *counts.entry(candidate_id).or_default() += 1;
        }
    }
    Ok(counts)
}

fn tally_line(candidate: &Candidate, counts: &HashMap<i64, u64>, total: u64) -> CandidateTally {
    let votes = counts.get(&candidate.id).copied().unwrap_or(0);
    CandidateTally {
        id: candidate.id,
        name: candidate.name.clone(),
        votes,
        percentage: percentage(votes, total),
    }
}

fn percentage(votes: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", votes as f64 / total as f64 * 100.0)
}
