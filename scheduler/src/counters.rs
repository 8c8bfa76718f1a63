use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Default, Debug)]
pub struct Counters {
    pub cycles: Arc<AtomicU64>,
    pub cycles_completed: Arc<AtomicU64>,

    // skip reasons
    pub skipped_domain: Arc<AtomicU64>,
    pub skipped_venue: Arc<AtomicU64>,

    /// Flatten failures that did not end the cycle.
    pub flatten_failures: Arc<AtomicU64>,

    pub signals: Arc<AtomicU64>,
    pub orders_submitted: Arc<AtomicU64>,
}

/// Point-in-time copy of [`Counters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub cycles: u64,
    pub cycles_completed: u64,
    pub skipped_domain: u64,
    pub skipped_venue: u64,
    pub flatten_failures: u64,
    pub signals: u64,
    pub orders_submitted: u64,
}

impl Counters {
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);
        CountersSnapshot {
            cycles: get(&self.cycles),
            cycles_completed: get(&self.cycles_completed),
            skipped_domain: get(&self.skipped_domain),
            skipped_venue: get(&self.skipped_venue),
            flatten_failures: get(&self.flatten_failures),
            signals: get(&self.signals),
            orders_submitted: get(&self.orders_submitted),
        }
    }
}
