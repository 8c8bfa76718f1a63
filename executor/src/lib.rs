//! Order management for a two-leg spread.
//!
//! Converts engine signals into broker orders: dollar-budget sizing per leg,
//! opposite-side market orders, and flattening both legs.

pub mod oms;
pub mod sizing;
pub mod types;

pub use oms::OrderManager;
pub use types::{FlattenReport, LegFill, LegOrder};
