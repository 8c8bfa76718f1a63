#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::Mutex;

use market::{MarketClock, OrderHandle, OrderSide, OrderStatus, TimeInForce, Venue, VenueError};

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOrder {
    pub symbol: String,
    pub qty: u64,
    pub side: OrderSide,
    pub time_in_force: TimeInForce,
}

#[derive(Default)]
pub struct VenueState {
    /// Clocks handed out in order; an open clock once exhausted.
    pub clocks: VecDeque<MarketClock>,
    pub bars: HashMap<String, Vec<f64>>,
    pub prices: HashMap<String, f64>,
    pub positions: HashSet<String>,

    pub fail_clock: bool,
    pub fail_bars: bool,
    pub fail_status: bool,
    pub fail_close_for: HashSet<String>,
    pub fail_submit_for: HashSet<String>,

    pub clock_calls: usize,
    pub bar_requests: Vec<(String, NaiveDate, NaiveDate)>,
    pub submitted: Vec<SubmittedOrder>,
    pub close_requests: Vec<String>,
    next_id: u64,
}

#[derive(Default, Clone)]
pub struct MockVenue {
    pub state: Arc<Mutex<VenueState>>,
}

impl MockVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_price(self, symbol: &str, price: f64) -> Self {
        self.state.lock().await.prices.insert(symbol.into(), price);
        self
    }

    pub async fn with_bars(self, symbol: &str, closes: &[f64]) -> Self {
        self.state.lock().await.bars.insert(symbol.into(), closes.to_vec());
        self
    }

    pub async fn set_bars(&self, symbol: &str, closes: &[f64]) {
        self.state.lock().await.bars.insert(symbol.into(), closes.to_vec());
    }

    pub async fn with_position(self, symbol: &str) -> Self {
        self.state.lock().await.positions.insert(symbol.into());
        self
    }
}

fn unavailable() -> VenueError {
    VenueError::Status {
        status: 503,
        body: "service unavailable".into(),
    }
}

#[async_trait]
impl Venue for MockVenue {
    async fn get_market_clock(&self) -> Result<MarketClock, VenueError> {
        let mut s = self.state.lock().await;
        s.clock_calls += 1;
        if s.fail_clock {
            return Err(unavailable());
        }
        Ok(s.clocks.pop_front().unwrap_or_else(|| {
            let now = Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap();
            MarketClock {
                is_open: true,
                next_open: now,
                now,
            }
        }))
    }

    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<f64>, VenueError> {
        let mut s = self.state.lock().await;
        s.bar_requests.push((symbol.to_string(), start, end));
        if s.fail_bars {
            return Err(unavailable());
        }
        Ok(s.bars.get(symbol).cloned().unwrap_or_default())
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<f64, VenueError> {
        let s = self.state.lock().await;
        s.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| VenueError::InvalidResponse(format!("no trade for {symbol}")))
    }

    async fn submit_market_order(
        &self,
        symbol: &str,
        qty: u64,
        side: OrderSide,
        time_in_force: TimeInForce,
    ) -> Result<OrderHandle, VenueError> {
        let mut s = self.state.lock().await;
        if s.fail_submit_for.contains(symbol) {
            return Err(VenueError::Rejected(format!("{symbol} not shortable")));
        }
        s.submitted.push(SubmittedOrder {
            symbol: symbol.to_string(),
            qty,
            side,
            time_in_force,
        });
        s.positions.insert(symbol.to_string());
        s.next_id += 1;
        Ok(OrderHandle {
            id: format!("ord-{}", s.next_id),
            symbol: symbol.to_string(),
        })
    }

    async fn get_order_status(&self, _order: &OrderHandle) -> Result<OrderStatus, VenueError> {
        let s = self.state.lock().await;
        if s.fail_status {
            return Err(unavailable());
        }
        Ok(OrderStatus::Filled)
    }

    async fn close_position(&self, symbol: &str) -> Result<Option<OrderHandle>, VenueError> {
        let mut s = self.state.lock().await;
        s.close_requests.push(symbol.to_string());
        if s.fail_close_for.contains(symbol) {
            return Err(unavailable());
        }
        if !s.positions.remove(symbol) {
            return Ok(None);
        }
        s.next_id += 1;
        Ok(Some(OrderHandle {
            id: format!("close-{}", s.next_id),
            symbol: symbol.to_string(),
        }))
    }
}
