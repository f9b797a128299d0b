use anyhow::Context;

use ballot_auth::sweeper::spawn_revocation_sweeper;
use ballot_server::config::{ConfigError, ServerConfig};
use ballot_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present; absence is not an error.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    ballot_server::observability::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e @ ConfigError::MissingJwtSecret) => {
            tracing::error!("signing secret missing; refusing to start");
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("Server error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::in_memory(&config);

    let sweeper = spawn_revocation_sweeper(state.revocations(), config.sweep_interval);
    let app = ballot_server::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "ballot server listening");

    let result = axum::serve(listener, app)
        .await
        .context("server terminated");
    sweeper.abort();
    result
}
