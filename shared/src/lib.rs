//! Shared types for the Tavolo order platform
//!
//! Common types used by the order server and its clients: the order status
//! state machine, order request/line-item types, notification payloads, and
//! pagination/principal types.

pub mod order;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use order::{
    NotificationKind, OrderNotification, OrderStatus, TransitionError, validate_transition,
};
pub use types::{PageQuery, PaginatedResponse, Principal, Role};
