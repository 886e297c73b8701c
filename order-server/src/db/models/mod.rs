//! Persistent Models

pub mod menu_item;
pub mod order;

// Re-exports
pub use menu_item::{MenuItem, OptionChoice, OptionGroup, SelectionType};
pub use order::Order;
