use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for one trading cycle.
///
/// `signal` and `zscore` start empty and are recorded once the engine has run.
pub fn cycle_span(pair_id: &str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "cycle",
        trace_id = %trace_id.as_str(),
        pair_id = %pair_id,
        zscore = field::Empty,
        signal = field::Empty
    )
}

/// Awaits `fut` and emits a warning when it took longer than `max`.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
