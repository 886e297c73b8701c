//! Messaging Module
//!
//! Shop-scoped notification fan-out for order lifecycle events.

pub mod hub;

pub use hub::{HubConfig, NotificationHub};
