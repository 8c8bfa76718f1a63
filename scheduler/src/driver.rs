//! The daily cycle.
//!
//! Flow per wake-up:
//! 1) Wait for market open.
//! 2) Flatten both legs (failure is logged, not fatal).
//! 3) Rebuild the spread series from daily bars.
//! 4) Ask the engine for a signal.
//! 5) Long/Short -> two opposite-side entry orders; Close -> flatten again.
//! 6) Sleep for the cycle interval.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::{Instrument, Span, info, warn};

use common::{TraceId, cycle_span};
use engine::{Signal, SignalEngine, SpreadSeries};
use executor::OrderManager;
use market::{Venue, VenueError};

use crate::clock::wait_for_market_open;
use crate::counters::Counters;
use crate::error::CycleError;
use crate::types::{CycleReport, DriverConfig};

pub struct Driver<V: Venue> {
    venue: Arc<V>,
    engine: SignalEngine,
    oms: OrderManager<V>,
    cfg: DriverConfig,

    /// Observability counters (does not affect behavior).
    counters: Counters,
}

impl<V: Venue> Driver<V> {
    pub fn new(venue: Arc<V>, engine: SignalEngine, cfg: DriverConfig, counters: Counters) -> Self {
        let oms = OrderManager::new(venue.clone(), cfg.pair.clone(), cfg.budget);
        Self {
            venue,
            engine,
            oms,
            cfg,
            counters,
        }
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Runs forever. Each failure is contained to its own cycle.
    pub async fn run(mut self) {
        let pair_id = self.cfg.pair.id();
        info!(
            pair_id = %pair_id,
            window = self.cfg.window,
            budget = self.cfg.budget,
            long_entry = self.engine.thresholds().long_entry(),
            short_entry = self.engine.thresholds().short_entry(),
            "trading loop started"
        );

        loop {
            match wait_for_market_open(self.venue.as_ref(), self.cfg.min_open_recheck).await {
                Ok(clock) => {
                    let span = cycle_span(&pair_id, &TraceId::default());
                    let today = clock.now.date_naive();
                    self.log_cycle(today).instrument(span).await;
                }
                Err(e) => {
                    Counters::incr(&self.counters.skipped_venue);
                    warn!(pair_id = %pair_id, error = %e, "market clock unavailable; skipping cycle");
                }
            }

            tokio::time::sleep(self.cfg.cycle_interval).await;
        }
    }

    async fn log_cycle(&mut self, today: NaiveDate) {
        match self.run_cycle(today).await {
            Ok(report) => info!(
                zscore = report.zscore,
                signal = ?report.signal,
                position = %report.position,
                orders = report.fills.len(),
                "cycle completed"
            ),
            Err(CycleError::Domain(e)) => warn!(
                error = %e,
                position = %self.engine.position(),
                "spread series unusable; skipping cycle"
            ),
            Err(CycleError::Venue(e)) => warn!(
                error = %e,
                transient = e.is_transient(),
                "venue failure; skipping cycle"
            ),
        }
    }

    /// One cycle body, after the market is known to be open.
    ///
    /// `today` is the venue's session date and bounds the bar request.
    pub async fn run_cycle(&mut self, today: NaiveDate) -> Result<CycleReport, CycleError> {
        Counters::incr(&self.counters.cycles);

        let res = self.cycle_inner(today).await;
        match &res {
            Ok(_) => Counters::incr(&self.counters.cycles_completed),
            Err(CycleError::Domain(_)) => Counters::incr(&self.counters.skipped_domain),
            Err(CycleError::Venue(_)) => Counters::incr(&self.counters.skipped_venue),
        }
        res
    }

    async fn cycle_inner(&mut self, today: NaiveDate) -> Result<CycleReport, CycleError> {
        let pre_flatten = match self.oms.flatten().await {
            Ok(report) => Some(report),
            Err(e) => {
                Counters::incr(&self.counters.flatten_failures);
                warn!(error = %e, "flatten before refresh failed; continuing");
                None
            }
        };

        let series = self.latest_spread(today).await?;

        let decision = self.engine.evaluate(series.values())?;
        Span::current().record("zscore", decision.zscore);
        if let Some(signal) = decision.signal {
            Span::current().record("signal", tracing::field::display(signal));
            Counters::incr(&self.counters.signals);
        }

        let mut fills = Vec::new();
        let mut close = None;

        match decision.signal {
            Some(signal @ (Signal::Long | Signal::Short)) => {
                fills = self.oms.open_spread(signal).await?;
                Counters::add(&self.counters.orders_submitted, fills.len() as u64);
            }
            Some(Signal::Close) => {
                close = Some(self.oms.flatten().await?);
            }
            None => {}
        }

        Ok(CycleReport {
            zscore: decision.zscore,
            signal: decision.signal,
            position: decision.position,
            pre_flatten,
            fills,
            close,
        })
    }

    /// Spread of the trailing `window` daily closes ending at `today`.
    async fn latest_spread(&self, today: NaiveDate) -> Result<SpreadSeries, CycleError> {
        let start = today
            .checked_sub_days(Days::new(self.cfg.lookback_days()))
            .ok_or_else(|| VenueError::InvalidResponse(format!("bad session date {today}")))?;

        let pair = &self.cfg.pair;
        let s1 = self.venue.get_daily_bars(&pair.s1, start, today).await?;
        let s2 = self.venue.get_daily_bars(&pair.s2, start, today).await?;

        if s1.len() != s2.len() {
            warn!(
                s1_bars = s1.len(),
                s2_bars = s2.len(),
                "bar counts differ; aligning on most recent closes"
            );
        }

        Ok(SpreadSeries::from_closes(&s1, &s2, self.cfg.window)?)
    }
}
