//! Daily trading loop for a single pair.
//!
//! Waits for the market to open, flattens, refreshes the spread, asks the
//! signal engine for a decision and forwards it to the order manager. A bad
//! cycle is logged and the loop carries on at its next wake-up.

pub mod clock;
pub mod counters;
pub mod driver;
pub mod error;
pub mod types;

pub use counters::Counters;
pub use driver::Driver;
pub use error::CycleError;
pub use types::{CycleReport, DriverConfig};
