use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Trading instruction emitted by the engine on a position transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Buy the spread: long S1, short S2.
    Long,
    /// Sell the spread: short S1, long S2.
    Short,
    /// Exit whatever spread position is open.
    Close,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Long => "LONG",
            Signal::Short => "SHORT",
            Signal::Close => "CLOSE",
        })
    }
}

/// Which side of the spread the engine believes it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    #[default]
    Flat,
    LongSpread,
    ShortSpread,
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PositionState::Flat => "flat",
            PositionState::LongSpread => "long_spread",
            PositionState::ShortSpread => "short_spread",
        })
    }
}

/// Entry thresholds on the z-score.
///
/// `long_entry` is usually negative and `short_entry` positive. Their relative
/// order is not enforced: when they overlap, the short trigger wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    long_entry: f64,
    short_entry: f64,
}

impl Thresholds {
    pub fn new(long_entry: f64, short_entry: f64) -> Result<Self, DomainError> {
        if !long_entry.is_finite() || !short_entry.is_finite() {
            return Err(DomainError::InvalidThresholds(format!(
                "long_entry={long_entry}, short_entry={short_entry}"
            )));
        }
        Ok(Self {
            long_entry,
            short_entry,
        })
    }

    pub fn long_entry(&self) -> f64 {
        self.long_entry
    }

    pub fn short_entry(&self) -> f64 {
        self.short_entry
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            long_entry: -1.65,
            short_entry: 1.65,
        }
    }
}
