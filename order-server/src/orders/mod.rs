//! Orders Module
//!
//! The order lifecycle core:
//! - [`storage`]: redb-backed persistence with atomic status transitions
//! - [`service`]: the orchestrator (create, transition, cancel, queries)
//! - [`kitchen`]: kitchen hand-off gateway and kitchen queue

pub mod error;
pub mod kitchen;
pub mod service;
pub mod storage;

// Re-exports
pub use error::{OrderError, OrderResult};
pub use kitchen::{KitchenGateway, KitchenOrderView};
pub use service::OrderService;
pub use storage::{OrderStorage, StorageError};
