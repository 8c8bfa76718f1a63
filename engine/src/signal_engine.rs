//! Three-state position machine driven by the spread z-score.
//!
//! | state        | condition        | next         | signal |
//! |--------------|------------------|--------------|--------|
//! | Flat         | z > short_entry  | ShortSpread  | Short  |
//! | Flat         | z < long_entry   | LongSpread   | Long   |
//! | ShortSpread  | z <= 0           | Flat         | Close  |
//! | LongSpread   | z >= 0           | Flat         | Close  |
//! | any          | otherwise        | unchanged    | none   |
//!
//! Entry is checked short-first, so overlapping thresholds resolve to Short.

use tracing::debug;

use crate::error::DomainError;
use crate::signal::{PositionState, Signal, Thresholds};
use crate::stats::zscore;

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub zscore: f64,
    pub signal: Option<Signal>,
    pub position: PositionState,
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    thresholds: Thresholds,
    position: PositionState,
}

impl SignalEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            position: PositionState::Flat,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    /// Scores `series` and applies the transition table.
    ///
    /// On error the position is left untouched.
    pub fn check_for_trades(&mut self, series: &[f64]) -> Result<Option<Signal>, DomainError> {
        self.evaluate(series).map(|d| d.signal)
    }

    /// Same as [`check_for_trades`](Self::check_for_trades) but also reports
    /// the z-score and the resulting position.
    pub fn evaluate(&mut self, series: &[f64]) -> Result<Decision, DomainError> {
        let z = zscore(series)?;
        let (next, signal) = transition(self.position, z, &self.thresholds);

        debug!(
            zscore = z,
            from = %self.position,
            to = %next,
            signal = ?signal,
            "signal evaluated"
        );

        self.position = next;
        Ok(Decision {
            zscore: z,
            signal,
            position: next,
        })
    }
}

/// Pure transition function behind [`SignalEngine`].
pub fn transition(
    state: PositionState,
    z: f64,
    thresholds: &Thresholds,
) -> (PositionState, Option<Signal>) {
    match state {
        PositionState::Flat if z > thresholds.short_entry() => {
            (PositionState::ShortSpread, Some(Signal::Short))
        }
        PositionState::Flat if z < thresholds.long_entry() => {
            (PositionState::LongSpread, Some(Signal::Long))
        }
        PositionState::ShortSpread if z <= 0.0 => (PositionState::Flat, Some(Signal::Close)),
        PositionState::LongSpread if z >= 0.0 => (PositionState::Flat, Some(Signal::Close)),
        unchanged => (unchanged, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SignalEngine {
        SignalEngine::new(Thresholds::new(-1.65, 1.65).unwrap())
    }

    fn engine_in(state: PositionState) -> SignalEngine {
        let mut e = engine();
        e.position = state;
        e
    }

    /// Eight values around 1.0 followed by `last`; a `last` just off 1.0
    /// lands on that side of the mean with |z| < 1.
    fn series_with_last(last: f64) -> Vec<f64> {
        let mut v = vec![1.0, 1.1, 0.9, 1.05, 0.95, 1.0, 1.02, 0.98];
        v.push(last);
        v
    }

    #[test]
    fn rising_tail_opens_short() {
        let mut e = engine();
        let d = e.evaluate(&[1.0, 1.02, 0.98, 1.01, 1.10]).unwrap();

        assert!(d.zscore > 1.65);
        assert_eq!(d.signal, Some(Signal::Short));
        assert_eq!(e.position(), PositionState::ShortSpread);
    }

    #[test]
    fn falling_tail_opens_long() {
        let mut e = engine();
        let signal = e.check_for_trades(&[1.0, 1.02, 0.98, 1.01, 0.90]).unwrap();

        assert_eq!(signal, Some(Signal::Long));
        assert_eq!(e.position(), PositionState::LongSpread);
    }

    #[test]
    fn short_closes_when_z_turns_negative() {
        let mut e = engine_in(PositionState::ShortSpread);
        let d = e.evaluate(&series_with_last(0.99)).unwrap();

        assert!(d.zscore < 0.0 && d.zscore > -1.0, "z = {}", d.zscore);
        assert_eq!(d.signal, Some(Signal::Close));
        assert_eq!(e.position(), PositionState::Flat);
    }

    #[test]
    fn long_closes_when_z_turns_positive() {
        let mut e = engine_in(PositionState::LongSpread);
        let d = e.evaluate(&series_with_last(1.01)).unwrap();

        assert!(d.zscore > 0.0 && d.zscore < 1.0, "z = {}", d.zscore);
        assert_eq!(d.signal, Some(Signal::Close));
        assert_eq!(e.position(), PositionState::Flat);
    }

    #[test]
    fn zero_z_closes_both_sides() {
        let t = Thresholds::default();
        assert_eq!(
            transition(PositionState::LongSpread, 0.0, &t),
            (PositionState::Flat, Some(Signal::Close))
        );
        assert_eq!(
            transition(PositionState::ShortSpread, 0.0, &t),
            (PositionState::Flat, Some(Signal::Close))
        );
    }

    #[test]
    fn flat_at_zero_holds() {
        let mut e = engine();
        // symmetric window: last equals the mean
        let signal = e.check_for_trades(&[0.9, 1.1, 1.0]).unwrap();

        assert_eq!(signal, None);
        assert_eq!(e.position(), PositionState::Flat);
    }

    #[test]
    fn open_position_holds_while_z_stays_on_its_side() {
        let t = Thresholds::default();
        assert_eq!(
            transition(PositionState::ShortSpread, 0.3, &t),
            (PositionState::ShortSpread, None)
        );
        assert_eq!(
            transition(PositionState::LongSpread, -0.3, &t),
            (PositionState::LongSpread, None)
        );
    }

    #[test]
    fn open_position_ignores_entry_triggers() {
        let t = Thresholds::default();
        assert_eq!(
            transition(PositionState::ShortSpread, 5.0, &t),
            (PositionState::ShortSpread, None)
        );
        assert_eq!(
            transition(PositionState::LongSpread, -5.0, &t),
            (PositionState::LongSpread, None)
        );
    }

    #[test]
    fn entry_thresholds_are_strict() {
        let t = Thresholds::default();
        assert_eq!(transition(PositionState::Flat, 1.65, &t), (PositionState::Flat, None));
        assert_eq!(transition(PositionState::Flat, -1.65, &t), (PositionState::Flat, None));
    }

    #[test]
    fn overlapping_thresholds_prefer_short() {
        // long_entry > short_entry: z = 0 satisfies both entry conditions.
        let t = Thresholds::new(1.0, -1.0).unwrap();
        assert_eq!(
            transition(PositionState::Flat, 0.0, &t),
            (PositionState::ShortSpread, Some(Signal::Short))
        );
    }

    #[test]
    fn constant_series_errors_without_mutating_state() {
        let mut e = engine_in(PositionState::LongSpread);

        assert_eq!(
            e.check_for_trades(&[2.0, 2.0, 2.0]),
            Err(DomainError::ZeroVariance)
        );
        assert_eq!(e.position(), PositionState::LongSpread);
    }

    #[test]
    fn flat_series_never_opens_with_tight_thresholds() {
        let mut e = SignalEngine::new(Thresholds::new(-0.5, 0.5).unwrap());

        assert_eq!(e.check_for_trades(&[0.01; 23]), Err(DomainError::ZeroVariance));
        assert_eq!(e.position(), PositionState::Flat);
    }

    #[test]
    fn same_input_same_output() {
        let series = [1.0, 1.02, 0.98, 1.01, 1.10];
        let mut a = engine();
        let mut b = engine();

        assert_eq!(a.evaluate(&series), b.evaluate(&series));
        assert_eq!(a.position(), b.position());
    }
}
