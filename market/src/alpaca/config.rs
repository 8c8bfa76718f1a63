use std::fmt;
use std::time::Duration;

pub const PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";
pub const MARKET_DATA_URL: &str = "https://data.alpaca.markets";

#[derive(Clone)]
pub struct AlpacaConfig {
    /// Trading API root (clock, orders, positions).
    pub trading_url: String,

    /// Market data API root (bars, latest trades).
    pub data_url: String,

    pub key_id: String,
    pub secret_key: String,

    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl AlpacaConfig {
    /// Reads `APCA_API_KEY_ID`, `APCA_API_SECRET_KEY`, `APCA_API_BASE_URL`,
    /// `APCA_DATA_URL` and `VENUE_TIMEOUT_SECS`, defaulting to the paper
    /// trading endpoint.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let timeout_secs = var("VENUE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        Self {
            trading_url: var("APCA_API_BASE_URL").unwrap_or_else(|| PAPER_TRADING_URL.to_string()),
            data_url: var("APCA_DATA_URL").unwrap_or_else(|| MARKET_DATA_URL.to_string()),
            key_id: var("APCA_API_KEY_ID").unwrap_or_default(),
            secret_key: var("APCA_API_SECRET_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.key_id.is_empty() && !self.secret_key.is_empty()
    }
}

impl fmt::Debug for AlpacaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlpacaConfig")
            .field("trading_url", &self.trading_url)
            .field("data_url", &self.data_url)
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
