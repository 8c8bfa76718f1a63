//! Order management for one pair.
//!
//! Entry and exit only; the decision of *when* belongs to the engine and the
//! driver. Every call goes straight to the venue, nothing is cached.

use std::sync::Arc;
use std::time::Duration;

use common::warn_if_slow;
use engine::Signal;
use market::{OrderHandle, Pair, TimeInForce, Venue, VenueError};
use tracing::{info, warn};

use crate::sizing::{leg_quantity, plan_spread_orders};
use crate::types::{FlattenReport, LegFill};

const SLOW_VENUE_CALL: Duration = Duration::from_secs(2);

pub struct OrderManager<V: Venue> {
    venue: Arc<V>,
    pair: Pair,

    /// Total dollars committed to one spread entry, split evenly across legs.
    budget: f64,

    time_in_force: TimeInForce,
}

impl<V: Venue> OrderManager<V> {
    pub fn new(venue: Arc<V>, pair: Pair, budget: f64) -> Self {
        Self {
            venue,
            pair,
            budget,
            time_in_force: TimeInForce::Day,
        }
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Sends the two entry orders for `signal`.
    ///
    /// Both legs are priced and sized before anything is submitted. If either
    /// leg rounds down to zero shares, nothing is sent. A venue failure on the
    /// second leg leaves the first leg open until the next flatten.
    pub async fn open_spread(&self, signal: Signal) -> Result<Vec<LegFill>, VenueError> {
        let legs = plan_spread_orders(&self.pair, signal);
        if legs.is_empty() {
            return Ok(Vec::new());
        }

        let mut sized = Vec::with_capacity(legs.len());
        for leg in legs {
            let price = self.venue.get_latest_price(&leg.symbol).await?;
            let qty = leg_quantity(self.budget, price);
            sized.push((leg, price, qty));
        }

        if let Some((leg, price, _)) = sized.iter().find(|(_, _, qty)| *qty == 0) {
            warn!(
                symbol = %leg.symbol,
                price,
                budget = self.budget,
                %signal,
                "leg sizes to zero shares; skipping spread entry"
            );
            return Ok(Vec::new());
        }

        let mut fills = Vec::with_capacity(sized.len());
        for (leg, price, qty) in sized {
            let order = warn_if_slow(
                "submit_market_order",
                SLOW_VENUE_CALL,
                self.venue
                    .submit_market_order(&leg.symbol, qty, leg.side, self.time_in_force),
            )
            .await?;

            info!(
                symbol = %leg.symbol,
                side = %leg.side,
                qty,
                price,
                order_id = %order.id,
                "entry order submitted"
            );

            fills.push(LegFill {
                symbol: leg.symbol,
                side: leg.side,
                qty,
                price,
                order,
            });
        }

        Ok(fills)
    }

    /// Closes any open position on both legs.
    ///
    /// Both legs are attempted even if the first one fails; the first error is
    /// returned afterwards.
    pub async fn flatten(&self) -> Result<FlattenReport, VenueError> {
        let mut report = FlattenReport::default();
        let mut handles: Vec<OrderHandle> = Vec::new();
        let mut first_err = None;

        for symbol in self.pair.symbols() {
            let res = warn_if_slow(
                "close_position",
                SLOW_VENUE_CALL,
                self.venue.close_position(symbol),
            )
            .await;

            match res {
                Ok(Some(order)) => {
                    info!(%symbol, order_id = %order.id, "close order submitted");
                    handles.push(order);
                }
                Ok(None) => report.already_flat.push(symbol.to_string()),
                Err(e) => {
                    warn!(%symbol, error = %e, "failed to close position");
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        for order in handles {
            let status = match self.venue.get_order_status(&order).await {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!(order_id = %order.id, error = %e, "close order status unavailable");
                    None
                }
            };
            report.closed.push((order, status));
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
