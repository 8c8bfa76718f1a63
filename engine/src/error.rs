use thiserror::Error;

/// Degenerate statistics input.
///
/// A cycle that produces one of these must be skipped; it is never a
/// "no signal" outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("spread series too short: {len} value(s), need at least 2")]
    TooShort { len: usize },

    #[error("spread series has zero variance")]
    ZeroVariance,

    #[error("z-score is not a finite number")]
    NonFinite,

    #[error("invalid price {value} at index {index}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
}
