//! Wire types of the brokerage REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Clock {
    pub timestamp: DateTime<Utc>,
    pub is_open: bool,
    pub next_open: DateTime<Utc>,
    pub next_close: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Bar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "c")]
    pub close: f64,
}

#[derive(Debug, Deserialize)]
pub struct BarsPage {
    #[serde(default)]
    pub bars: Option<Vec<Bar>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Trade {
    #[serde(rename = "p")]
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct LatestTrade {
    pub symbol: String,
    pub trade: Trade,
}

#[derive(Debug, Serialize)]
pub struct NewOrder<'a> {
    pub symbol: &'a str,
    pub qty: String,
    pub side: &'static str,
    #[serde(rename = "type")]
    pub order_type: &'static str,
    pub time_in_force: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u64>,
    #[serde(default)]
    pub message: String,
}
