//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;

use ballot_auth::middleware::AuthState;
use ballot_auth::token::TokenService;
use ballot_core::{CandidateStorage, ImageStore, RevocationStore, UserStorage};
use ballot_storage_memory::{
    InMemoryCandidateStorage, InMemoryImageStore, InMemoryRevocationStore, InMemoryUserStorage,
};

use crate::config::ServerConfig;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Auth state consumed by the session and admin gates.
    pub auth: AuthState,
    /// Candidate persistence.
    pub candidates: Arc<dyn CandidateStorage>,
    /// Image asset persistence.
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Builds state from pre-constructed parts.
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStorage>,
        revocations: Arc<dyn RevocationStore>,
        candidates: Arc<dyn CandidateStorage>,
        images: Arc<dyn ImageStore>,
        sweep_on_check: bool,
    ) -> Self {
        Self {
            auth: AuthState::new(tokens, users, revocations).with_sweep_on_check(sweep_on_check),
            candidates,
            images,
        }
    }

    /// Builds state backed entirely by in-memory stores.
    #[must_use]
    pub fn in_memory(config: &ServerConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.token_lifetime));
        Self::new(
            tokens,
            Arc::new(InMemoryUserStorage::new()),
            Arc::new(InMemoryRevocationStore::new()),
            Arc::new(InMemoryCandidateStorage::new()),
            Arc::new(InMemoryImageStore::new()),
            config.sweep_on_check,
        )
    }

    /// The revocation store, for wiring the background sweeper.
    #[must_use]
    pub fn revocations(&self) -> Arc<dyn RevocationStore> {
        Arc::clone(&self.auth.revocations)
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
