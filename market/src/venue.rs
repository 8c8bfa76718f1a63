use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::VenueError;
use crate::types::{MarketClock, OrderHandle, OrderSide, OrderStatus, TimeInForce};

/// Abstraction over the brokerage.
///
/// Implementations own transport, authentication and wire formats; callers
/// only see domain types and [`VenueError`].
#[async_trait]
pub trait Venue: Send + Sync + 'static {
    async fn get_market_clock(&self) -> Result<MarketClock, VenueError>;

    /// Daily closing prices for `symbol` between `start` and `end` inclusive,
    /// oldest first.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<f64>, VenueError>;

    async fn get_latest_price(&self, symbol: &str) -> Result<f64, VenueError>;

    async fn submit_market_order(
        &self,
        symbol: &str,
        qty: u64,
        side: OrderSide,
        time_in_force: TimeInForce,
    ) -> Result<OrderHandle, VenueError>;

    async fn get_order_status(&self, order: &OrderHandle) -> Result<OrderStatus, VenueError>;

    /// Liquidates the open position in `symbol`. `Ok(None)` when there is none.
    async fn close_position(&self, symbol: &str) -> Result<Option<OrderHandle>, VenueError>;
}
