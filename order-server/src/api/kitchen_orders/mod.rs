//! Kitchen Order API Module
//!
//! Kitchen display endpoints. Only dispatched orders are visible here, and
//! status updates through this surface require the dispatch flag.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Kitchen router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/kitchen/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::queue))
        .route("/{id}/status", put(handler::update_status))
}
