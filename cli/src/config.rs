use std::time::Duration;

use anyhow::{Context, bail};
use engine::Thresholds;
use market::Pair;
use market::alpaca::AlpacaConfig;
use scheduler::DriverConfig;

use crate::cli::Cli;

/// About twenty years of trading days.
const MAX_WINDOW: usize = 5_000;

/// One year.
const MAX_CYCLE_HOURS: u64 = 24 * 366;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pair: Pair,
    pub thresholds: Thresholds,

    /// Lookback window W, in trading days. At least 2.
    pub window: usize,

    /// Dollars per spread entry, split evenly across the two legs.
    pub budget: f64,

    pub cycle_interval: Duration,

    pub json_logs: bool,

    pub venue: AlpacaConfig,
}

impl AppConfig {
    /// Validates CLI arguments and reads venue settings from the environment.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let s1 = cli.s1.trim().to_uppercase();
        let s2 = cli.s2.trim().to_uppercase();
        if s1.is_empty() || s2.is_empty() {
            bail!("both pair symbols are required");
        }
        if s1 == s2 {
            bail!("pair legs must differ, got {s1} twice");
        }

        let thresholds =
            Thresholds::new(cli.long_entry, cli.short_entry).context("invalid thresholds")?;

        if !(2..=MAX_WINDOW).contains(&cli.window) {
            bail!(
                "lookback window must be between 2 and {MAX_WINDOW}, got {}",
                cli.window
            );
        }
        if !cli.budget.is_finite() || cli.budget <= 0.0 {
            bail!("budget must be a positive amount, got {}", cli.budget);
        }
        if !(1..=MAX_CYCLE_HOURS).contains(&cli.cycle_hours) {
            bail!(
                "cycle interval must be between 1 and {MAX_CYCLE_HOURS} hours, got {}",
                cli.cycle_hours
            );
        }

        let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";

        Ok(Self {
            pair: Pair::new(s1, s2),
            thresholds,
            window: cli.window,
            budget: cli.budget,
            cycle_interval: Duration::from_secs(cli.cycle_hours * 60 * 60),
            json_logs: cli.json_logs || is_production,
            venue: AlpacaConfig::from_env(),
        })
    }

    pub fn driver_config(&self) -> DriverConfig {
        let mut cfg = DriverConfig::new(self.pair.clone(), self.window, self.budget);
        cfg.cycle_interval = self.cycle_interval;
        cfg
    }
}
