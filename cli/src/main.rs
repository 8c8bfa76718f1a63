pub mod cli;
pub mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use common::init_logger;
use engine::SignalEngine;
use market::alpaca::AlpacaClient;
use scheduler::{Counters, Driver};

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_cli(&cli)?;

    init_logger("pairs-bot", cfg.json_logs);

    if !cfg.venue.has_credentials() {
        tracing::warn!("APCA_API_KEY_ID / APCA_API_SECRET_KEY not set; venue calls will be rejected");
    }

    tracing::info!(
        pair_id = %cfg.pair.id(),
        trading_url = %cfg.venue.trading_url,
        "starting pairs bot"
    );

    let venue = Arc::new(AlpacaClient::new(&cfg.venue).context("failed to build venue client")?);
    let engine = SignalEngine::new(cfg.thresholds);
    let counters = Counters::default();

    let driver = Driver::new(venue, engine, cfg.driver_config(), counters.clone());

    tokio::select! {
        _ = driver.run() => {}
        res = tokio::signal::ctrl_c() => {
            res.context("failed to listen for shutdown signal")?;
            tracing::info!(counters = ?counters.snapshot(), "Shutdown signal received");
        }
    }

    Ok(())
}
