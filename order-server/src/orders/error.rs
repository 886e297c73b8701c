//! Order error taxonomy
//!
//! Typed errors for every failure class in the order core. These propagate
//! unmodified to the HTTP boundary, where `AppError` maps each kind to a
//! status code. The core never swallows a failed transition or pricing
//! validation; only notification publishes are best-effort.

use crate::orders::storage::StorageError;
use crate::pricing::PricingError;
use shared::order::{OrderStatus, TransitionError};
use thiserror::Error;

/// Order core errors
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order/menu item does not exist or is not visible in the caller's shop scope
    #[error("not found: {0}")]
    NotFound(String),

    /// Requested status change violates the state machine
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// Pricing/options validation failure at creation time
    #[error(transparent)]
    InvalidOrder(#[from] PricingError),

    /// Kitchen hand-off attempted outside `InProgress`, or repeated
    #[error("invalid state for kitchen hand-off: order is {status}, sent={is_sent}")]
    InvalidState {
        status: OrderStatus,
        is_sent: bool,
    },

    /// Concurrent-update guard tripped; caller should retry the transition
    #[error("concurrent update conflict: expected status {expected}, found {actual}")]
    Conflict {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// Storage layer failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for order operations
pub type OrderResult<T> = Result<T, OrderError>;
