//! Order lifecycle notification payloads
//!
//! Broadcast to shop-scoped subscribers (kitchen displays, staff dashboards)
//! on every successful lifecycle change. Delivery is best-effort: publication
//! failure never rolls back the persisted state change.

use super::status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    NewOrder,
    OrderStatusUpdated,
    OrderSentToKitchen,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewOrder => write!(f, "newOrder"),
            Self::OrderStatusUpdated => write!(f, "orderStatusUpdated"),
            Self::OrderSentToKitchen => write!(f, "orderSentToKitchen"),
        }
    }
}

/// Order lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub order_id: String,
    pub shop_id: String,
    pub status: OrderStatus,
    /// Emission timestamp (milliseconds)
    pub timestamp: i64,
}

impl OrderNotification {
    pub fn new(
        kind: NotificationKind,
        order_id: impl Into<String>,
        shop_id: impl Into<String>,
        status: OrderStatus,
    ) -> Self {
        Self {
            kind,
            order_id: order_id.into(),
            shop_id: shop_id.into(),
            status,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_wire_format() {
        let n = OrderNotification::new(
            NotificationKind::OrderStatusUpdated,
            "order-1",
            "shop-1",
            OrderStatus::Confirmed,
        );
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "orderStatusUpdated");
        assert_eq!(value["status"], "CONFIRMED");
        assert_eq!(value["shop_id"], "shop-1");
    }
}
