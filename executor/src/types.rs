//! Types shared between sizing and order submission.

use market::{OrderHandle, OrderSide, OrderStatus};

/// One leg of a spread entry, before sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegOrder {
    pub symbol: String,
    pub side: OrderSide,
}

/// An entry leg the venue accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct LegFill {
    pub symbol: String,
    pub side: OrderSide,
    pub qty: u64,
    pub price: f64,
    pub order: OrderHandle,
}

/// Result of closing both legs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenReport {
    /// Close orders the venue created, with the status observed right after.
    /// `None` when the status lookup itself failed.
    pub closed: Vec<(OrderHandle, Option<OrderStatus>)>,

    /// Symbols that had no open position.
    pub already_flat: Vec<String>,
}

impl FlattenReport {
    pub fn is_noop(&self) -> bool {
        self.closed.is_empty()
    }
}
