//! Order request and line-item types
//!
//! Split between *input* types (what clients send at checkout) and
//! *snapshot* types (what gets embedded in the stored order). Prices on
//! snapshots are captured at order time and never change afterwards, so
//! later menu edits cannot retroactively alter historical orders.

use serde::{Deserialize, Serialize};

// ============================================================================
// Input Types (checkout request)
// ============================================================================

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Ordered items (validation middleware guarantees non-empty)
    pub items: Vec<OrderItemInput>,
    /// Table number for dine-in orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    /// Payment transaction reference, when checkout was paid upfront
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
}

/// One ordered item as sent by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Referenced menu item
    pub menu_item_id: String,
    /// Quantity (validation middleware guarantees >= 1)
    pub quantity: u32,
    /// Selected option groups
    #[serde(default)]
    pub options: Vec<OptionSelection>,
}

/// Selection within one option group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSelection {
    /// Option group identifier on the menu item
    pub group_id: String,
    /// Chosen choice identifiers within that group
    pub choice_ids: Vec<String>,
}

// ============================================================================
// Snapshot Types (embedded in the stored order)
// ============================================================================

/// Line item snapshot - prices frozen at order time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemSnapshot {
    /// Referenced menu item
    pub menu_item_id: String,
    /// Menu item name at order time
    pub name: String,
    /// Quantity
    pub quantity: u32,
    /// Discount percentage applied at order time (0 = none)
    pub discount_percent: f64,
    /// Computed unit price: discounted base plus selected choice deltas
    pub unit_price: f64,
    /// unit_price * quantity
    pub line_total: f64,
    /// Selected options with name/price snapshots
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionSnapshot>,
}

/// Selected option choice snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedOptionSnapshot {
    pub group_id: String,
    pub group_name: String,
    pub choice_id: String,
    pub choice_name: String,
    /// Price delta captured at order time
    pub price_delta: f64,
}
