//! Order status state machine
//!
//! A strict linear chain with one side-exit:
//!
//! ```text
//! Pending → Confirmed → InProgress → Preparing → Ready → Delivered
//!    │          │
//!    └──────────┴──▶ Cancelled
//! ```
//!
//! Non-cancel transitions must advance exactly one step. Cancellation is
//! allowed only from the two earliest states, so kitchen work is never
//! undone and the confirmation step (payment) cannot be skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation (payment)
    #[default]
    Pending,
    /// Confirmed by shop or payment subsystem
    Confirmed,
    /// Accepted into the preparation flow
    InProgress,
    /// Kitchen is cooking
    Preparing,
    /// Ready for pickup / serving
    Ready,
    /// Handed to the customer (terminal)
    Delivered,
    /// Cancelled before preparation began (terminal)
    Cancelled,
}

/// The forward sequence of the happy path, in order.
const SEQUENCE: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::InProgress,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// All statuses, including `Cancelled`
    pub fn all() -> [OrderStatus; 7] {
        [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
    }

    /// The next state on the happy path, if any
    pub fn next(&self) -> Option<OrderStatus> {
        let idx = SEQUENCE.iter().position(|s| s == self)?;
        SEQUENCE.get(idx + 1).copied()
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Cancellation window: only before preparation begins
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Rejected status transition
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("invalid transition from {from} to {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Validate a requested status transition.
///
/// Accepts exactly two shapes:
/// 1. the immediate successor on the happy path (index difference of +1)
/// 2. `Cancelled`, when the current status is `Pending` or `Confirmed`
///
/// Everything else is rejected, including skips, backward moves, moves out
/// of a terminal state, cancel-from-cancel and cancel-from-delivered.
pub fn validate_transition(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<(), TransitionError> {
    let rejected = TransitionError {
        from: current,
        to: requested,
    };

    if requested == OrderStatus::Cancelled {
        return if current.can_cancel() {
            Ok(())
        } else {
            Err(rejected)
        };
    }

    match current.next() {
        Some(next) if next == requested => Ok(()),
        _ => Err(rejected),
    }
}
