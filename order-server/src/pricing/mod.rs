//! Pricing Module
//!
//! Pure price computation for order creation. No I/O, deterministic.

pub mod engine;

pub use engine::{PricingError, order_total, price_line_item, to_decimal, to_f64};
