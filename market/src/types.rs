use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two legs of the spread, `s1 / s2`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub s1: String,
    pub s2: String,
}

impl Pair {
    pub fn new(s1: impl Into<String>, s2: impl Into<String>) -> Self {
        Self {
            s1: s1.into(),
            s2: s2.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("{}/{}", self.s1, self.s2)
    }

    pub fn symbols(&self) -> [&str; 2] {
        [&self.s1, &self.s2]
    }
}

/// Venue trading-session clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketClock {
    pub is_open: bool,
    pub next_open: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl MarketClock {
    /// Wall-clock time left until the next open; zero when open or overdue.
    pub fn time_to_open(&self) -> std::time::Duration {
        if self.is_open {
            return std::time::Duration::ZERO;
        }
        (self.next_open - self.now).to_std().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn opposite(self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    #[default]
    Day,
    Gtc,
    Ioc,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Day => "day",
            TimeInForce::Gtc => "gtc",
            TimeInForce::Ioc => "ioc",
        }
    }
}

/// Reference to an order accepted by the venue.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct OrderHandle {
    pub id: String,
    pub symbol: String,
}

/// Broker order lifecycle state.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum OrderStatus {
    New,
    Accepted,
    PartiallyFilled,
    Filled,
    Canceled,
    Expired,
    Rejected,
    Other(String),
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Canceled | OrderStatus::Expired | OrderStatus::Rejected
        )
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "new" | "pending_new" => OrderStatus::New,
            "accepted" => OrderStatus::Accepted,
            "partially_filled" => OrderStatus::PartiallyFilled,
            "filled" => OrderStatus::Filled,
            "canceled" => OrderStatus::Canceled,
            "expired" => OrderStatus::Expired,
            "rejected" => OrderStatus::Rejected,
            other => OrderStatus::Other(other.to_string()),
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::New => f.write_str("new"),
            OrderStatus::Accepted => f.write_str("accepted"),
            OrderStatus::PartiallyFilled => f.write_str("partially_filled"),
            OrderStatus::Filled => f.write_str("filled"),
            OrderStatus::Canceled => f.write_str("canceled"),
            OrderStatus::Expired => f.write_str("expired"),
            OrderStatus::Rejected => f.write_str("rejected"),
            OrderStatus::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn closed_clock_reports_remaining_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 13, 0, 0).unwrap();
        let clock = MarketClock {
            is_open: false,
            next_open: Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap(),
            now,
        };
        assert_eq!(clock.time_to_open().as_secs(), 90 * 60);
    }

    #[test]
    fn open_or_stale_clock_does_not_wait() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap();

        let open = MarketClock {
            is_open: true,
            next_open: past,
            now,
        };
        let stale = MarketClock {
            is_open: false,
            next_open: past,
            now,
        };

        assert!(open.time_to_open().is_zero());
        assert!(stale.time_to_open().is_zero());
    }

    #[test]
    fn status_parses_broker_strings() {
        assert_eq!("filled".parse::<OrderStatus>().unwrap(), OrderStatus::Filled);
        assert_eq!("pending_new".parse::<OrderStatus>().unwrap(), OrderStatus::New);
        assert_eq!(
            "done_for_day".parse::<OrderStatus>().unwrap(),
            OrderStatus::Other("done_for_day".into())
        );
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::Accepted.is_terminal());
    }

    #[test]
    fn pair_id_and_sides() {
        let p = Pair::new("ALK", "UAL");
        assert_eq!(p.id(), "ALK/UAL");
        assert_eq!(p.symbols(), ["ALK", "UAL"]);
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
    }
}
