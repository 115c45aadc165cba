//! Otomono Admin library.
//!
//! The back-office panel, exposed as a library so integration tests can
//! build the router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod prefs;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use config::AdminConfig;
use state::AppState;

/// Build the full admin router over the given state.
///
/// The session layer is part of the router because every authenticated
/// route depends on it.
#[must_use]
pub fn app(state: AppState, config: &AdminConfig) -> Router {
    let session_layer = middleware::session::create_session_layer(config);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/admin/static"))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
