//! API Routing Module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - shop-scoped order lifecycle endpoints
//! - [`kitchen_orders`] - kitchen display endpoints
//!
//! Every order route is nested under `/api/shops/{shop_id}`, so tenant scope
//! is carried in the path and enforced by the storage layer's composite keys.

pub mod health;
pub mod kitchen_orders;
pub mod orders;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the full application router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(kitchen_orders::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
