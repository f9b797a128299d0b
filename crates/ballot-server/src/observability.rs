//! Tracing initialisation.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialises the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, defaulting to `info`. Called
/// once from `main`; a second call is a no-op so tests may race it safely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
