//! Voting backend HTTP server.
//!
//! Wires the auth core, the storage backends and the Axum router together.
//! The binary in `main.rs` loads configuration from the environment, builds
//! the in-memory stores and serves the router; integration tests drive the
//! same router in-process.

pub mod config;
pub mod observability;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
