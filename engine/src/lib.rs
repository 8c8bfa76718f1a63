//! Pairs-trading signal engine.
//!
//! Turns a rolling spread series into a position transition. Pure with respect
//! to its inputs: the only state is the current position side.

pub mod error;
pub mod signal;
pub mod signal_engine;
pub mod spread;
pub mod stats;

pub use error::DomainError;
pub use signal::{PositionState, Signal, Thresholds};
pub use signal_engine::{Decision, SignalEngine, transition};
pub use spread::SpreadSeries;
pub use stats::zscore;
