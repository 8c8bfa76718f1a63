use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::alpaca::config::AlpacaConfig;
use crate::alpaca::types::{ApiErrorBody, BarsPage, Clock, LatestTrade, NewOrder, Order};
use crate::errors::VenueError;
use crate::types::{MarketClock, OrderHandle, OrderSide, OrderStatus, TimeInForce};
use crate::venue::Venue;

/// Upper bound on bar pages followed for a single request.
const MAX_BAR_PAGES: usize = 20;

#[derive(Clone)]
pub struct AlpacaClient {
    http: Client,
    trading_url: String,
    data_url: String,
}

impl AlpacaClient {
    pub fn new(cfg: &AlpacaConfig) -> Result<Self, VenueError> {
        let mut headers = HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", header_value(&cfg.key_id)?);
        headers.insert("APCA-API-SECRET-KEY", header_value(&cfg.secret_key)?);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(cfg.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            trading_url: cfg.trading_url.trim_end_matches('/').to_string(),
            data_url: cfg.data_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, VenueError> {
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        Ok(resp.json().await?)
    }
}

fn header_value(v: &str) -> Result<HeaderValue, VenueError> {
    let mut value = HeaderValue::from_str(v)
        .map_err(|_| VenueError::Config("credential is not a valid header value".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Maps a non-success response into a [`VenueError`].
///
/// The broker answers 403 and 422 on order endpoints when it refuses an order
/// (buying power, shortability, bad quantity); those surface as `Rejected`.
fn status_error(status: StatusCode, body: String) -> VenueError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty());

    match (status, message) {
        (StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY, Some(m)) => {
            VenueError::Rejected(m)
        }
        (_, message) => VenueError::Status {
            status: status.as_u16(),
            body: message.unwrap_or(body),
        },
    }
}

fn order_handle(order: Order) -> OrderHandle {
    OrderHandle {
        id: order.id,
        symbol: order.symbol,
    }
}

#[async_trait]
impl Venue for AlpacaClient {
    #[instrument(skip(self), level = "debug")]
    async fn get_market_clock(&self) -> Result<MarketClock, VenueError> {
        let url = format!("{}/v2/clock", self.trading_url);
        let clock: Clock = self.send_json(self.http.get(&url)).await?;

        debug!(
            is_open = clock.is_open,
            next_open = %clock.next_open,
            next_close = %clock.next_close,
            "market clock fetched"
        );

        Ok(MarketClock {
            is_open: clock.is_open,
            next_open: clock.next_open,
            now: clock.timestamp,
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<f64>, VenueError> {
        let url = format!("{}/v2/stocks/{}/bars", self.data_url, symbol);
        let start = start.to_string();
        let end = end.to_string();

        let mut closes = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_BAR_PAGES {
            let mut req = self.http.get(&url).query(&[
                ("timeframe", "1Day"),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("adjustment", "all"),
                ("limit", "10000"),
            ]);
            if let Some(token) = &page_token {
                req = req.query(&[("page_token", token.as_str())]);
            }

            let page: BarsPage = self.send_json(req).await?;
            closes.extend(page.bars.unwrap_or_default().into_iter().map(|b| b.close));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => {
                    debug!(bars = closes.len(), "daily bars fetched");
                    return Ok(closes);
                }
            }
        }

        warn!(bars = closes.len(), "bar pagination limit reached");
        Ok(closes)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_latest_price(&self, symbol: &str) -> Result<f64, VenueError> {
        let url = format!("{}/v2/stocks/{}/trades/latest", self.data_url, symbol);
        let latest: LatestTrade = self.send_json(self.http.get(&url)).await?;

        if latest.symbol != symbol {
            return Err(VenueError::InvalidResponse(format!(
                "asked for {symbol}, got trade for {}",
                latest.symbol
            )));
        }

        Ok(latest.trade.price)
    }

    #[instrument(skip(self), level = "debug")]
    async fn submit_market_order(
        &self,
        symbol: &str,
        qty: u64,
        side: OrderSide,
        time_in_force: TimeInForce,
    ) -> Result<OrderHandle, VenueError> {
        let url = format!("{}/v2/orders", self.trading_url);
        let body = NewOrder {
            symbol,
            qty: qty.to_string(),
            side: side.as_str(),
            order_type: "market",
            time_in_force: time_in_force.as_str(),
        };

        let order: Order = self.send_json(self.http.post(&url).json(&body)).await?;
        if order.status == "rejected" {
            return Err(VenueError::Rejected(format!("order {} rejected", order.id)));
        }

        debug!(order_id = %order.id, status = %order.status, "order submitted");
        Ok(order_handle(order))
    }

    #[instrument(skip(self, order), fields(order_id = %order.id), level = "debug")]
    async fn get_order_status(&self, order: &OrderHandle) -> Result<OrderStatus, VenueError> {
        let url = format!("{}/v2/orders/{}", self.trading_url, order.id);
        let order: Order = self.send_json(self.http.get(&url)).await?;

        let Ok(status) = order.status.parse::<OrderStatus>();
        Ok(status)
    }

    #[instrument(skip(self), level = "debug")]
    async fn close_position(&self, symbol: &str) -> Result<Option<OrderHandle>, VenueError> {
        let url = format!("{}/v2/positions/{}", self.trading_url, symbol);

        match self.send_json::<Order>(self.http.delete(&url)).await {
            Ok(order) => Ok(Some(order_handle(order))),
            Err(VenueError::Status { status: 404, .. }) => {
                debug!("no open position to close");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
