//! Time sources for the evaluator.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic nanosecond clock.
pub trait Clock {
    /// Nanoseconds since an arbitrary fixed origin.
    fn now_ns(&self) -> u64;
}

/// Wall-independent clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Manually driven clock for tests and offline simulation.
///
/// Clones share the same time, so a test can keep a handle while the
/// engine owns another.
///
/// ```
/// use pointeraccel_engine::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance_ms(8);
/// assert_eq!(clock.now_ns(), 8_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock at `now_ns`.
    #[must_use]
    pub fn starting_at(now_ns: u64) -> Self {
        let clock = Self::new();
        clock.set_ns(now_ns);
        clock
    }

    /// Jump to `now_ns`.
    pub fn set_ns(&self, now_ns: u64) {
        self.now.store(now_ns, Ordering::Relaxed);
    }

    /// Move forward by `delta_ns`.
    pub fn advance_ns(&self, delta_ns: u64) {
        self.now.fetch_add(delta_ns, Ordering::Relaxed);
    }

    /// Move forward by `delta_ms` milliseconds.
    pub fn advance_ms(&self, delta_ms: u64) {
        self.advance_ns(delta_ms.saturating_mul(1_000_000));
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ns();
        let b = clock.now_ns();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::starting_at(10);
        let other = clock.clone();
        other.advance_ns(5);
        assert_eq!(clock.now_ns(), 15);
        clock.set_ns(1);
        assert_eq!(other.now_ns(), 1);
    }
}
