//! Order API Module
//!
//! Shop-scoped order lifecycle endpoints. All state changes funnel through
//! the order service; handlers never touch storage directly.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/send-to-kitchen", put(handler::send_to_kitchen))
}
