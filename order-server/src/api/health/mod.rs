//! Health check route
//!
//! # Routes
//!
//! | Path | Method | Description | Auth |
//! |------|--------|-------------|------|
//! | /api/health | GET | Liveness check | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health check router, public
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | error)
    status: &'static str,
    version: &'static str,
    environment: String,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}
