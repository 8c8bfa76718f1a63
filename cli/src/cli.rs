use clap::Parser;

/// Pairs-trading bot for one pair of correlated stocks.
#[derive(Debug, Clone, Parser)]
#[command(name = "pairs-bot", version)]
pub struct Cli {
    /// First leg (numerator of the spread)
    #[arg(long, env = "PAIR_S1", default_value = "ALK")]
    pub s1: String,

    /// Second leg (denominator of the spread)
    #[arg(long, env = "PAIR_S2", default_value = "UAL")]
    pub s2: String,

    /// Enter a long spread when the z-score falls below this value
    #[arg(long, env = "LONG_ENTRY", default_value_t = -1.75, allow_negative_numbers = true)]
    pub long_entry: f64,

    /// Enter a short spread when the z-score rises above this value
    #[arg(long, env = "SHORT_ENTRY", default_value_t = 1.75, allow_negative_numbers = true)]
    pub short_entry: f64,

    /// Lookback window in trading days
    #[arg(long, env = "LOOKBACK_WINDOW", default_value_t = 50)]
    pub window: usize,

    /// Total dollar budget per spread entry, split evenly across the legs
    #[arg(long, env = "MAX_BUDGET", default_value_t = 10_000.0, allow_negative_numbers = true)]
    pub budget: f64,

    /// Hours between trading cycles
    #[arg(long, env = "CYCLE_HOURS", default_value_t = 24)]
    pub cycle_hours: u64,

    /// Emit JSON logs (also enabled by APP_ENV=production)
    #[arg(long)]
    pub json_logs: bool,
}
