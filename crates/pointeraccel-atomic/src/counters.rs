//! Atomic counters for the acceleration sample path.
//!
//! # RT Safety
//!
//! All `inc_*` methods are a single `fetch_add` with `Ordering::Relaxed`.
//! The counters are diagnostics only and never synchronize other memory.

use core::sync::atomic::{AtomicU64, Ordering};

/// Counter snapshot returned by [`EngineCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Motion samples processed
    pub samples: u64,
    /// Samples where at least one axis overflowed and fell back to raw input
    pub overflow_samples: u64,
    /// Samples evaluated with a pass-through factor because no usable mode
    /// was committed
    pub pass_through_samples: u64,
    /// Configuration commits applied
    pub commits: u64,
    /// Samples that saw a pending update held back by the cooldown
    pub debounced_samples: u64,
    /// Configuration fields rejected while staging
    pub rejected_fields: u64,
    /// Updates dropped because the mailbox was full
    pub mailbox_drops: u64,
}

/// Atomic counters shared between the engine and its observers.
///
/// Wrap in an `Arc` to read from another thread while the engine runs.
#[derive(Debug, Default)]
pub struct EngineCounters {
    samples: AtomicU64,
    overflow_samples: AtomicU64,
    pass_through_samples: AtomicU64,
    commits: AtomicU64,
    debounced_samples: AtomicU64,
    rejected_fields: AtomicU64,
    mailbox_drops: AtomicU64,
}

impl EngineCounters {
    /// Create counters initialized to zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: AtomicU64::new(0),
            overflow_samples: AtomicU64::new(0),
            pass_through_samples: AtomicU64::new(0),
            commits: AtomicU64::new(0),
            debounced_samples: AtomicU64::new(0),
            rejected_fields: AtomicU64::new(0),
            mailbox_drops: AtomicU64::new(0),
        }
    }

    /// Count one processed sample.
    #[inline]
    pub fn inc_sample(&self) {
        self.samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one sample with an overflowed axis.
    #[inline]
    pub fn inc_overflow(&self) {
        self.overflow_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one sample evaluated without acceleration.
    #[inline]
    pub fn inc_pass_through(&self) {
        self.pass_through_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one configuration commit.
    #[inline]
    pub fn inc_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one sample that deferred a pending update.
    #[inline]
    pub fn inc_debounced(&self) {
        self.debounced_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Count rejected configuration fields.
    #[inline]
    pub fn inc_rejected_by(&self, amount: u64) {
        self.rejected_fields.fetch_add(amount, Ordering::Relaxed);
    }

    /// Count one update dropped at the mailbox.
    #[inline]
    pub fn inc_mailbox_drop(&self) {
        self.mailbox_drops.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters without resetting them.
    ///
    /// Values are individually atomic, not a consistent cut across counters.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            samples: self.samples.load(Ordering::Relaxed),
            overflow_samples: self.overflow_samples.load(Ordering::Relaxed),
            pass_through_samples: self.pass_through_samples.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            debounced_samples: self.debounced_samples.load(Ordering::Relaxed),
            rejected_fields: self.rejected_fields.load(Ordering::Relaxed),
            mailbox_drops: self.mailbox_drops.load(Ordering::Relaxed),
        }
    }

    /// Read and zero all counters.
    ///
    /// # RT Safety
    ///
    /// **NOT RT-safe**. Call from the observer side only.
    #[inline]
    #[must_use]
    pub fn snapshot_and_reset(&self) -> CounterSnapshot {
        CounterSnapshot {
            samples: self.samples.swap(0, Ordering::Relaxed),
            overflow_samples: self.overflow_samples.swap(0, Ordering::Relaxed),
            pass_through_samples: self.pass_through_samples.swap(0, Ordering::Relaxed),
            commits: self.commits.swap(0, Ordering::Relaxed),
            debounced_samples: self.debounced_samples.swap(0, Ordering::Relaxed),
            rejected_fields: self.rejected_fields.swap(0, Ordering::Relaxed),
            mailbox_drops: self.mailbox_drops.swap(0, Ordering::Relaxed),
        }
    }
}

impl CounterSnapshot {
    /// Fraction of samples that overflowed, or 0.0 before any sample.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn overflow_ratio(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.overflow_samples as f64 / self.samples as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increments_are_counted() {
        let counters = EngineCounters::new();
        counters.inc_sample();
        counters.inc_sample();
        counters.inc_overflow();
        counters.inc_pass_through();
        counters.inc_commit();
        counters.inc_debounced();
        counters.inc_rejected_by(3);
        counters.inc_mailbox_drop();

        let snap = counters.snapshot();
        assert_eq!(
            snap,
            CounterSnapshot {
                samples: 2,
                overflow_samples: 1,
                pass_through_samples: 1,
                commits: 1,
                debounced_samples: 1,
                rejected_fields: 3,
                mailbox_drops: 1,
            }
        );
    }

    #[test]
    fn test_snapshot_and_reset_zeroes() {
        let counters = EngineCounters::new();
        counters.inc_sample();
        assert_eq!(counters.snapshot_and_reset().samples, 1);
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_overflow_ratio() {
        assert!(CounterSnapshot::default().overflow_ratio().abs() < f64::EPSILON);
        let snap = CounterSnapshot {
            samples: 4,
            overflow_samples: 1,
            ..CounterSnapshot::default()
        };
        assert!((snap.overflow_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
