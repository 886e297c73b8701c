//! Order Lifecycle Module
//!
//! This module provides types for the order lifecycle:
//! - Status: the order status state machine
//! - Types: order creation requests and line-item snapshots
//! - Notifications: shop-scoped lifecycle events for fan-out

pub mod notification;
pub mod status;
pub mod types;

// Re-exports
pub use notification::{NotificationKind, OrderNotification};
pub use status::{OrderStatus, TransitionError, validate_transition};
pub use types::*;
