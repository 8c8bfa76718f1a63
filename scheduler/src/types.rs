//! Shared types used by the driver.

use std::time::Duration;

use engine::{PositionState, Signal};
use executor::{FlattenReport, LegFill};
use market::Pair;

/// Knobs for one pair's trading loop.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub pair: Pair,

    /// Lookback window W, in trading days.
    pub window: usize,

    /// Total dollars for one spread entry, split evenly between the legs.
    pub budget: f64,

    /// Sleep between the end of one cycle and the next market-open check.
    pub cycle_interval: Duration,

    /// Shortest sleep while waiting for the open, so a stale venue clock
    /// cannot turn the wait into a busy loop.
    pub min_open_recheck: Duration,
}

impl DriverConfig {
    pub fn new(pair: Pair, window: usize, budget: f64) -> Self {
        Self {
            pair,
            window,
            budget,
            cycle_interval: Duration::from_secs(24 * 60 * 60),
            min_open_recheck: Duration::from_secs(60),
        }
    }

    /// Calendar days requested from the venue so that `window` trading days
    /// fit even across weekends and holidays.
    pub fn lookback_days(&self) -> u64 {
        (self.window as u64).saturating_mul(2).saturating_add(10)
    }
}

/// What one completed cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub zscore: f64,
    pub signal: Option<Signal>,
    pub position: PositionState,

    /// Flatten performed at the start of the cycle. `None` when it failed.
    pub pre_flatten: Option<FlattenReport>,

    /// Entry legs sent for a Long or Short signal.
    pub fills: Vec<LegFill>,

    /// Flatten performed for a Close signal.
    pub close: Option<FlattenReport>,
}
