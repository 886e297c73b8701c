//! Notification hub
//!
//! # Architecture
//!
//! ```text
//! OrderService ──▶ publish(shop_id, notification)
//!                          │
//!                 ┌────────┴─────────┐
//!                 │  NotificationHub │  one broadcast channel per shop
//!                 └────────┬─────────┘
//!          ┌───────────────┼────────────────┐
//!          ▼               ▼                ▼
//!    kitchen display  staff dashboard  (other shop-scoped listeners)
//! ```
//!
//! The hub is an injected handle, constructed once per process and passed
//! into the order service, so tests can substitute a recording subscriber.
//! Delivery is best-effort: publishing to a shop with no subscribers is not
//! an error, and publish failures never affect persisted state.

use dashmap::DashMap;
use shared::order::OrderNotification;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Hub configuration
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Capacity of each shop's broadcast channel
    pub channel_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// Shop-scoped publish-subscribe channel for order lifecycle events
#[derive(Debug)]
pub struct NotificationHub {
    config: HubConfig,
    /// Shop ID -> broadcast sender, created lazily on first use
    channels: DashMap<String, broadcast::Sender<OrderNotification>>,
}

impl NotificationHub {
    /// Create a hub with default configuration
    pub fn new() -> Self {
        Self::from_config(HubConfig::default())
    }

    pub fn from_config(config: HubConfig) -> Self {
        Self {
            config,
            channels: DashMap::new(),
        }
    }

    /// Create a shared handle with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Arc<Self> {
        Arc::new(Self::from_config(HubConfig {
            channel_capacity: capacity,
        }))
    }

    /// Broadcast a notification to the shop's subscribers.
    ///
    /// Best-effort: with no active subscribers the event is dropped and
    /// logged at debug level. Callers never fail because of fan-out.
    pub fn publish(&self, shop_id: &str, notification: OrderNotification) {
        let sender = self.sender(shop_id);
        match sender.send(notification) {
            Ok(receivers) => {
                tracing::debug!(shop_id, receivers, "order notification published");
            }
            Err(_) => {
                tracing::debug!(shop_id, "order notification dropped: no subscribers");
            }
        }
    }

    /// Subscribe to a shop's order lifecycle events
    pub fn subscribe(&self, shop_id: &str) -> broadcast::Receiver<OrderNotification> {
        self.sender(shop_id).subscribe()
    }

    /// Number of active subscribers for a shop
    pub fn subscriber_count(&self, shop_id: &str) -> usize {
        self.channels
            .get(shop_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    fn sender(&self, shop_id: &str) -> broadcast::Sender<OrderNotification> {
        self.channels
            .entry(shop_id.to_string())
            .or_insert_with(|| broadcast::channel(self.config.channel_capacity).0)
            .clone()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}
