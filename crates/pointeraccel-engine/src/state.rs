//! Per-process sample history: truncation carry and frame time.

use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};

/// Readings below this are treated as timer resolution artifacts.
pub const MIN_FRAME_MS: Fixed = Fixed::ONE;
/// Frame times are clamped to this after an input gap.
pub const MAX_FRAME_MS: Fixed = Fixed::from_int(100);

const NS_PER_MS: u64 = 1_000_000;
const MAX_FRAME_NS: u64 = 100 * NS_PER_MS;

/// Fractional remainders lost to truncation on the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryState {
    /// X remainder.
    pub x: Fixed,
    /// Y remainder.
    pub y: Fixed,
    /// Wheel remainder.
    pub wheel: Fixed,
}

impl CarryState {
    /// Add the X/Y carry to `value`, truncate, and keep the new remainder.
    ///
    /// Returns `None` and clears the carry if the sum is the overflow
    /// sentinel.
    #[inline]
    pub fn settle_axis(carry: &mut Fixed, value: Fixed) -> Option<i32> {
        settle(carry, value + *carry)
    }

    /// Like [`CarryState::settle_axis`], but the carry is only added when
    /// it has the same sign as `value`, so it can never reverse a wheel
    /// tick.
    #[inline]
    pub fn settle_wheel(carry: &mut Fixed, value: Fixed) -> Option<i32> {
        let same_sign = (value.is_positive() && carry.is_positive())
            || (value.is_negative() && carry.is_negative());
        let total = if same_sign { value + *carry } else { value };
        settle(carry, total)
    }

    /// Whether every remainder is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.wheel.is_zero()
    }
}

#[inline]
fn settle(carry: &mut Fixed, total: Fixed) -> Option<i32> {
    if total.is_overflow() {
        *carry = Fixed::ZERO;
        return None;
    }
    let whole = total.to_int();
    *carry = total.fract_toward_zero();
    Some(whole)
}

/// Last event time and last accepted frame duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTimeState {
    last_ns: u64,
    frame_ms: Fixed,
}

impl Default for FrameTimeState {
    fn default() -> Self {
        Self {
            last_ns: 0,
            frame_ms: Fixed::ONE,
        }
    }
}

impl FrameTimeState {
    /// Accept a new event at `now_ns` and return the frame time in
    /// milliseconds, always within `[1, 100]`.
    ///
    /// Elapsed times below one millisecond reuse the previous frame time;
    /// longer gaps are clamped to 100 ms. A clock that steps backwards
    /// counts as zero elapsed time.
    #[inline]
    pub fn advance(&mut self, now_ns: u64) -> Fixed {
        let elapsed_ns = now_ns.saturating_sub(self.last_ns);
        self.last_ns = now_ns;
        let ms = if elapsed_ns >= MAX_FRAME_NS {
            MAX_FRAME_MS
        } else {
            // elapsed_ns < 1e8 fits in i32.
            Fixed::from_int(i32::try_from(elapsed_ns).unwrap_or(i32::MAX))
                .div_int(NS_PER_MS as i32)
        };
        if ms >= MIN_FRAME_MS {
            self.frame_ms = ms;
        }
        self.frame_ms
    }

    /// Last accepted frame time in milliseconds.
    #[must_use]
    pub fn frame_ms(&self) -> Fixed {
        self.frame_ms
    }

    /// Timestamp of the last event.
    #[must_use]
    pub fn last_ns(&self) -> u64 {
        self.last_ns
    }
}
