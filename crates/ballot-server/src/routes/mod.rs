//! HTTP routes.
//!
//! Three tiers: public (register, login, results), ordinary-gated (logout,
//! user and candidate reads, voting) and admin-gated (candidate management).
//! The gates are the `SessionAuth`/`AdminAuth` extractors in handler
//! signatures; there is no separate middleware layer to keep in sync with
//! the route table.

mod auth;
mod candidates;
mod results;
mod users;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/results/all", get(results::all))
        .route("/results/candidate/{id}", get(results::for_candidate))
        // Ordinary-gated
        .route("/logout", post(auth::logout))
        .route("/user/{id}", get(users::get_user))
        .route("/user/{id}/vote", get(users::get_user_vote))
        .route("/user/vote", post(users::vote))
        .route("/candidate/all", get(candidates::list))
        // Admin-gated (same paths, different extractors)
        .route("/candidate", post(candidates::create))
        .route(
            "/candidate/{id}",
            get(candidates::get_candidate)
                .put(candidates::update)
                .delete(candidates::delete),
        )
        .route("/candidate/{id}/image", put(candidates::upload_image))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
