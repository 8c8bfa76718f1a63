//! Waiting for the trading session.

use std::time::Duration;

use market::{MarketClock, Venue, VenueError};
use tracing::{debug, info};

/// Suspends until the venue reports the market open and returns that clock.
///
/// Each wait is a single sleep for the time the venue says is left, never
/// shorter than `min_recheck`.
pub async fn wait_for_market_open<V: Venue + ?Sized>(
    venue: &V,
    min_recheck: Duration,
) -> Result<MarketClock, VenueError> {
    let mut clock = venue.get_market_clock().await?;

    while !clock.is_open {
        let wait = clock.time_to_open().max(min_recheck);
        info!(
            next_open = %clock.next_open,
            minutes = wait.as_secs() / 60,
            "market closed; sleeping until open"
        );

        tokio::time::sleep(wait).await;
        clock = venue.get_market_clock().await?;
    }

    debug!(now = %clock.now, "market open");
    Ok(clock)
}
