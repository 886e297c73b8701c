//! Kitchen hand-off gateway
//!
//! The kitchen only sees orders that were explicitly dispatched. Dispatch is
//! valid exactly once, from `InProgress`; the queue is the set of dispatched
//! in-progress orders, oldest first, with line items expanded into a display
//! shape the kitchen screen renders directly.

use serde::Serialize;
use shared::order::{LineItemSnapshot, OrderStatus};

use crate::db::models::Order;
use crate::orders::error::OrderResult;
use crate::orders::storage::OrderStorage;

/// Kitchen-facing boundary over the order storage
#[derive(Clone)]
pub struct KitchenGateway {
    storage: OrderStorage,
}

/// A dispatched order as the kitchen display renders it
#[derive(Debug, Clone, Serialize)]
pub struct KitchenOrderView {
    pub order_id: String,
    pub order_number: String,
    pub table_number: Option<u32>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub items: Vec<KitchenItemView>,
}

/// One line of a kitchen ticket
#[derive(Debug, Clone, Serialize)]
pub struct KitchenItemView {
    pub name: String,
    pub quantity: u32,
    /// Selected options as "Group: choice" display lines
    pub options: Vec<String>,
}

impl KitchenGateway {
    pub fn new(storage: OrderStorage) -> Self {
        Self { storage }
    }

    /// Flip the dispatch flag, valid once and only from `InProgress`
    pub fn send_to_kitchen(&self, shop_id: &str, order_id: &str) -> OrderResult<Order> {
        self.storage.mark_sent_to_kitchen(shop_id, order_id)
    }

    /// Dispatched in-progress orders for the shop, oldest first
    pub fn kitchen_orders(&self, shop_id: &str) -> OrderResult<Vec<KitchenOrderView>> {
        let queue = self.storage.kitchen_queue(shop_id)?;
        Ok(queue.iter().map(to_view).collect())
    }
}

fn to_view(order: &Order) -> KitchenOrderView {
    KitchenOrderView {
        order_id: order.id.clone(),
        order_number: order.order_number.clone(),
        table_number: order.table_number,
        status: order.status,
        created_at: order.created_at,
        items: order.items.iter().map(to_item_view).collect(),
    }
}

fn to_item_view(item: &LineItemSnapshot) -> KitchenItemView {
    KitchenItemView {
        name: item.name.clone(),
        quantity: item.quantity,
        options: item
            .selected_options
            .iter()
            .map(|o| format!("{}: {}", o.group_name, o.choice_name))
            .collect(),
    }
}
