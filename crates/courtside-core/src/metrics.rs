//! Global atomic counters for Courtside observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. before a process exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, no allocations, no locking.
pub struct Metrics {
    analyses_accepted: AtomicU64,
    analyses_rejected: AtomicU64,
    classifier_fallbacks: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            analyses_accepted: AtomicU64::new(0),
            analyses_rejected: AtomicU64::new(0),
            classifier_fallbacks: AtomicU64::new(0),
        }
    }

    pub fn inc_accepted(&self) {
        self.analyses_accepted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "analyses_accepted", "counter incremented");
    }

    pub fn inc_rejected(&self) {
        self.analyses_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "analyses_rejected", "counter incremented");
    }

    /// An analysis proceeded without a usable classifier signal.
    pub fn inc_classifier_fallbacks(&self) {
        self.classifier_fallbacks.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "classifier_fallbacks", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            analyses_accepted = self.analyses_accepted(),
            analyses_rejected = self.analyses_rejected(),
            classifier_fallbacks = self.classifier_fallbacks(),
        );
    }

    pub fn analyses_accepted(&self) -> u64 {
        self.analyses_accepted.load(Ordering::Relaxed)
    }

    pub fn analyses_rejected(&self) -> u64 {
        self.analyses_rejected.load(Ordering::Relaxed)
    }

    pub fn classifier_fallbacks(&self) -> u64 {
        self.classifier_fallbacks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let m = Metrics::new();
        m.inc_accepted();
        m.inc_accepted();
        m.inc_rejected();
        m.inc_classifier_fallbacks();
        assert_eq!(m.analyses_accepted(), 2);
        assert_eq!(m.analyses_rejected(), 1);
        assert_eq!(m.classifier_fallbacks(), 1);
        m.flush();
    }
}
