//! Order Model
//!
//! One document per order, scoped by shop. Orders are never physically
//! deleted; cancellation is a terminal status, not a delete. Status mutations
//! go through the storage layer's atomic transition operations only.

use serde::{Deserialize, Serialize};
use shared::order::{LineItemSnapshot, OrderStatus};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier
    pub id: String,
    /// Owning shop (tenant scope)
    pub shop_id: String,
    /// Human-facing sequential number, e.g. "412-0007"
    pub order_number: String,
    /// Placing user; None for guest orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Table number for dine-in orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    /// Ordered line items with prices frozen at order time
    pub items: Vec<LineItemSnapshot>,
    /// Recomputed sum of line totals, never client-trusted
    pub total_amount: f64,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Set once the order is dispatched to the kitchen queue; never reset
    #[serde(default)]
    pub is_sent_to_kitchen: bool,
    /// Payment transaction reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    /// Creation timestamp (milliseconds)
    pub created_at: i64,
    /// Last update timestamp (milliseconds)
    pub updated_at: i64,
}

impl Order {
    /// Touch the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}
