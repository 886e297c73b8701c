//! Tavolo Order Server - multi-tenant restaurant order backend
//!
//! # Architecture Overview
//!
//! The core of this service is the order lifecycle: status transitions,
//! kitchen hand-off, cancellation policy and the pricing computation tied
//! to order creation.
//!
//! - **Pricing** (`pricing`): pure per-line and order-total computation
//! - **Orders** (`orders`): redb-backed storage with atomic transitions,
//!   the order service orchestrator and the kitchen hand-off gateway
//! - **Messaging** (`message`): shop-scoped notification fan-out
//! - **HTTP API** (`api`): RESTful order and kitchen endpoints
//!
//! # Module Structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # config, state, server
//! ├── utils/         # errors, logging
//! ├── db/            # persistent models
//! ├── pricing/       # pricing engine
//! ├── orders/        # storage, service, kitchen gateway
//! ├── message/       # notification hub
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use message::NotificationHub;
pub use orders::{KitchenGateway, OrderError, OrderService, OrderStorage};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
