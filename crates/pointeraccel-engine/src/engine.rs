//! The real-time sample evaluator.

use std::sync::Arc;

use pointeraccel_atomic::EngineCounters;
use pointeraccel_curves::{CurveParams, ModeConstants};
use pointeraccel_errors::{EngineFault, ParamError};
use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::mailbox::{ConfigMailbox, ConfigSender, config_channel};
use crate::params::{AccelParams, ParamKey};
use crate::pending::{Debounce, PendingUpdate};
use crate::state::{CarryState, FrameTimeState};

/// Raw or accelerated motion for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionDelta {
    /// Horizontal counts.
    pub dx: i32,
    /// Vertical counts.
    pub dy: i32,
    /// Wheel ticks.
    pub wheel: i32,
}

impl MotionDelta {
    /// Create a delta.
    #[must_use]
    pub const fn new(dx: i32, dy: i32, wheel: i32) -> Self {
        Self { dx, dy, wheel }
    }
}

/// Result of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    /// Adjusted motion for the host.
    pub delta: MotionDelta,
    /// Degraded mode the output came from, if any.
    pub fault: Option<EngineFault>,
}

/// Sine and cosine of the input rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rotation {
    sin: Fixed,
    cos: Fixed,
}

impl Rotation {
    #[inline]
    fn apply(&self, dx: Fixed, dy: Fixed) -> (Fixed, Fixed) {
        (dx * self.cos - dy * self.sin, dx * self.sin + dy * self.cos)
    }
}

/// Angle snapping window around a direction and its opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AngleSnap {
    threshold: Fixed,
    angle: Fixed,
    sin: Fixed,
    cos: Fixed,
}

impl AngleSnap {
    #[inline]
    fn apply(&self, dx: Fixed, dy: Fixed) -> (Fixed, Fixed) {
        if dx.is_zero() && dy.is_zero() {
            return (dx, dy);
        }
        let mut diff = Fixed::atan2(dy, dx) - self.angle;
        if diff > Fixed::PI {
            diff = diff - Fixed::TAU;
        } else if diff <= -Fixed::PI {
            diff = diff + Fixed::TAU;
        }
        let distance = diff.abs();
        if distance <= self.threshold {
            let magnitude = Fixed::hypot(dx, dy);
            (magnitude * self.cos, magnitude * self.sin)
        } else if Fixed::PI - distance <= self.threshold {
            let magnitude = Fixed::hypot(dx, dy);
            (-(magnitude * self.cos), -(magnitude * self.sin))
        } else {
            (dx, dy)
        }
    }
}

/// Everything the sample path derives from the committed parameters.
///
/// Rebuilt once per commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConstants {
    mode: ModeConstants,
    curve: CurveParams,
    wheel_scale: Fixed,
    rotation: Option<Rotation>,
    snap: Option<AngleSnap>,
    y_ratio: Option<Fixed>,
}

impl EngineConstants {
    /// Derive constants from `params`.
    #[must_use]
    pub fn build(params: &AccelParams) -> Self {
        let curve = params.curve_params();
        let rotation = (!params.rotation_angle.is_zero()).then(|| Rotation {
            sin: params.rotation_angle.sin(),
            cos: params.rotation_angle.cos(),
        });
        let snap = params.angle_snap_threshold.is_positive().then(|| {
            let sin = params.angle_snap_angle.sin();
            let cos = params.angle_snap_angle.cos();
            AngleSnap {
                threshold: params.angle_snap_threshold,
                angle: Fixed::atan2(sin, cos),
                sin,
                cos,
            }
        });
        let y_ratio = (!params.sensitivity_y.is_zero() && params.sensitivity_y != params.sensitivity)
            .then(|| params.sensitivity_y / params.sensitivity);
        Self {
            mode: ModeConstants::build(&curve),
            curve,
            wheel_scale: params.scrolls_per_tick.div_int(3),
            rotation,
            snap,
            y_ratio,
        }
    }

    /// Cached curve constants.
    #[must_use]
    pub fn mode(&self) -> &ModeConstants {
        &self.mode
    }

    /// Curve parameters the mode constants were built from.
    #[must_use]
    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Wheel multiplier, `ScrollsPerTick / 3`.
    #[must_use]
    pub fn wheel_scale(&self) -> Fixed {
        self.wheel_scale
    }

    /// Acceleration factor at `rate` counts per millisecond.
    #[inline]
    #[must_use]
    pub fn factor(&self, rate: Fixed) -> Fixed {
        if rate.is_overflow() {
            return Fixed::OVERFLOW;
        }
        self.mode.evaluate(rate, &self.curve)
    }
}

/// Pointer acceleration engine.
///
/// Owns the committed parameters, their derived constants, the carry and
/// frame-time history and any staged configuration. One instance serves
/// every device, so all devices share one acceleration history.
///
/// # RT Safety
///
/// [`AccelEngine::process`] does not allocate, lock or block. A commit
/// rebuilds the constants in place; it happens at most once per second.
///
/// # Example
///
/// ```
/// use pointeraccel_engine::{AccelEngine, AccelParams, ManualClock, MotionDelta};
///
/// let mut engine = AccelEngine::with_clock(AccelParams::default(), ManualClock::new());
/// let out = engine.process(8_000_000, MotionDelta::new(5, -3, 1));
/// assert_eq!(out.delta, MotionDelta::new(5, -3, 1));
/// assert_eq!(out.fault, None);
/// ```
#[derive(Debug)]
pub struct AccelEngine<C: Clock = MonotonicClock> {
    clock: C,
    params: AccelParams,
    constants: EngineConstants,
    carry: CarryState,
    frame: FrameTimeState,
    pending: PendingUpdate,
    debounce: Debounce,
    mailbox: Option<(ConfigSender, ConfigMailbox)>,
    counters: Arc<EngineCounters>,
    overflow_run: bool,
}

impl AccelEngine<MonotonicClock> {
    /// Engine driven by the monotonic system clock.
    #[must_use]
    pub fn new(params: AccelParams) -> Self {
        Self::with_clock(params, MonotonicClock::new())
    }
}

impl<C: Clock> AccelEngine<C> {
    /// Engine driven by `clock`.
    #[must_use]
    pub fn with_clock(params: AccelParams, clock: C) -> Self {
        let constants = EngineConstants::build(&params);
        if let Some(fault) = constants.mode().fault() {
            warn!(%fault, mode = %params.mode, "Starting without acceleration");
        }
        Self {
            clock,
            params,
            constants,
            carry: CarryState::default(),
            frame: FrameTimeState::default(),
            pending: PendingUpdate::new(),
            debounce: Debounce::default(),
            mailbox: None,
            counters: Arc::new(EngineCounters::new()),
            overflow_run: false,
        }
    }

    /// Committed parameters.
    #[must_use]
    pub fn params(&self) -> &AccelParams {
        &self.params
    }

    /// Constants derived from the committed parameters.
    #[must_use]
    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Current truncation carry.
    #[must_use]
    pub fn carry(&self) -> CarryState {
        self.carry
    }

    /// Last accepted frame time in milliseconds.
    #[must_use]
    pub fn frame_time(&self) -> Fixed {
        self.frame.frame_ms()
    }

    /// Staged, uncommitted configuration.
    #[must_use]
    pub fn pending(&self) -> &PendingUpdate {
        &self.pending
    }

    /// Earliest time the next commit may happen.
    #[must_use]
    pub fn next_commit_ns(&self) -> u64 {
        self.debounce.next_commit_ns()
    }

    /// Shared diagnostic counters.
    #[must_use]
    pub fn counters(&self) -> &Arc<EngineCounters> {
        &self.counters
    }

    /// The engine's clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Sender for staging configuration from other threads.
    ///
    /// The first call creates a mailbox holding up to `capacity` updates;
    /// later calls return another handle to the same mailbox.
    pub fn config_sender(&mut self, capacity: usize) -> ConfigSender {
        let counters = Arc::clone(&self.counters);
        let (sender, _) = self
            .mailbox
            .get_or_insert_with(|| config_channel(capacity, counters));
        sender.clone()
    }

    /// Stage one `key = text` field.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if the field is rejected. The rejection is
    /// counted and nothing staged or committed changes.
    pub fn stage(&mut self, key: &str, text: &str) -> Result<ParamKey, ParamError> {
        self.pending.stage(key, text).inspect_err(|error| {
            self.counters.inc_rejected_by(1);
            warn!(%error, "Rejected configuration field");
        })
    }

    /// Merge an already-staged update.
    pub fn stage_update(&mut self, update: PendingUpdate) {
        self.pending.merge(update);
    }

    /// Request a commit of everything staged. It happens at the first
    /// sample at or after the cooldown deadline.
    pub fn trigger(&mut self) {
        self.pending.trigger();
    }

    /// Evaluate one sample at the clock's current time.
    pub fn accelerate(&mut self, input: MotionDelta) -> MotionDelta {
        let now_ns = self.clock.now_ns();
        self.process(now_ns, input).delta
    }

    /// Evaluate one sample received at `now_ns`.
    ///
    /// Never fails: faults are reported in the outcome and the output is
    /// always usable.
    pub fn process(&mut self, now_ns: u64, input: MotionDelta) -> SampleOutcome {
        self.counters.inc_sample();

        let frame_ms = self.frame.advance(now_ns);
        self.poll_config(now_ns);

        let params = &self.params;
        let constants = &self.constants;

        let mut dx = Fixed::from_int(input.dx) * params.pre_scale_x;
        let mut dy = Fixed::from_int(input.dy) * params.pre_scale_y;
        if let Some(rotation) = &constants.rotation {
            (dx, dy) = rotation.apply(dx, dy);
        }
        if let Some(snap) = &constants.snap {
            (dx, dy) = snap.apply(dx, dy);
        }

        let mut magnitude = Fixed::hypot(dx, dy);
        if !params.speed_cap.is_zero() && magnitude >= params.speed_cap {
            let scale = params.speed_cap / magnitude;
            dx = dx * scale;
            dy = dy * scale;
            magnitude = params.speed_cap;
        }

        let mut rate = magnitude / frame_ms;
        if params.input_cap.is_positive() {
            rate = rate.min(params.input_cap);
        }
        rate = rate - params.offset;

        let factor = if rate.is_overflow() {
            Fixed::OVERFLOW
        } else if rate.is_positive() {
            constants.factor(rate)
        } else {
            Fixed::ONE
        };
        let mut sensitivity = params.sensitivity * factor;
        if params.sensitivity_cap.is_positive() && sensitivity >= params.sensitivity_cap {
            sensitivity = params.sensitivity_cap;
        }
        let multiplier_x = sensitivity / params.sensitivity;
        let multiplier_y = match constants.y_ratio {
            Some(ratio) => multiplier_x * ratio,
            None => multiplier_x,
        };

        let dx = dx * multiplier_x * params.post_scale_x;
        let dy = dy * multiplier_y * params.post_scale_y;
        let wheel = Fixed::from_int(input.wheel) * constants.wheel_scale;

        let settled_x = CarryState::settle_axis(&mut self.carry.x, dx);
        let settled_y = CarryState::settle_axis(&mut self.carry.y, dy);
        let settled_wheel = CarryState::settle_wheel(&mut self.carry.wheel, wheel);
        let overflowed = settled_x.is_none() || settled_y.is_none() || settled_wheel.is_none();
        let delta = MotionDelta {
            dx: settled_x.unwrap_or(input.dx),
            dy: settled_y.unwrap_or(input.dy),
            wheel: settled_wheel.unwrap_or(input.wheel),
        };

        let mode_fault = self.constants.mode().fault();
        if mode_fault.is_some() {
            self.counters.inc_pass_through();
        }
        let fault = if overflowed {
            self.counters.inc_overflow();
            if !self.overflow_run {
                warn!(
                    dx = input.dx,
                    dy = input.dy,
                    wheel = input.wheel,
                    "Fixed-point overflow, passing raw input through"
                );
            }
            Some(EngineFault::ArithmeticOverflow)
        } else {
            mode_fault
        };
        self.overflow_run = overflowed;

        SampleOutcome { delta, fault }
    }

    /// Drain the mailbox and commit staged configuration if the cooldown
    /// has elapsed.
    fn poll_config(&mut self, now_ns: u64) {
        if let Some((_, mailbox)) = &self.mailbox {
            mailbox.drain_into(&mut self.pending);
        }
        if !self.pending.is_triggered() {
            return;
        }
        if !self.debounce.ready(now_ns) {
            self.counters.inc_debounced();
            return;
        }

        let written = self.pending.apply_to(&mut self.params);
        self.constants = EngineConstants::build(&self.params);
        self.debounce.rearm(now_ns);
        self.counters.inc_commit();
        debug!(
            written,
            mode = %self.params.mode,
            next_commit_ns = self.debounce.next_commit_ns(),
            "Committed configuration"
        );
        if let Some(fault) = self.constants.mode().fault() {
            warn!(%fault, mode = %self.params.mode, "Acceleration disabled until a usable mode is committed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointeraccel_curves::AccelMode;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    const MS: u64 = 1_000_000;

    fn engine(params: AccelParams) -> AccelEngine<crate::clock::ManualClock> {
        AccelEngine::with_clock(params, crate::clock::ManualClock::new())
    }

    #[test]
    fn test_identity_transform() {
        let mut engine = engine(AccelParams::default());
        for i in 1..=10 {
            let out = engine.process(i * 4 * MS, MotionDelta::new(5, -3, 1));
            assert_eq!(out.delta, MotionDelta::new(5, -3, 1));
            assert_eq!(out.fault, None);
            assert!(engine.carry().is_zero());
        }
    }

    #[test]
    fn test_linear_acceleration_scales_output() {
        let mut params = AccelParams::default();
        params.acceleration = Fixed::from_ratio(1, 4);
        let mut engine = engine(params);
        engine.process(100 * MS, MotionDelta::default());
        // 8 counts in 2 ms: rate 4, factor 1 + 4/4 = 2.
        let out = engine.process(102 * MS, MotionDelta::new(8, 0, 0));
        assert_eq!(out.delta, MotionDelta::new(16, 0, 0));
    }

    #[test]
    fn test_sensitivity_cap_limits_multiplier() {
        let mut params = AccelParams::default();
        params.acceleration = Fixed::ONE;
        params.sensitivity_cap = Fixed::from_ratio(3, 2);
        let mut engine = engine(params);
        engine.process(100 * MS, MotionDelta::default());
        let out = engine.process(101 * MS, MotionDelta::new(10, 0, 0));
        assert_eq!(out.delta, MotionDelta::new(15, 0, 0));
    }

    #[test]
    fn test_separate_y_sensitivity_is_a_ratio() {
        let mut params = AccelParams::default();
        params.sensitivity_y = Fixed::TWO;
        let mut engine = engine(params);
        let out = engine.process(4 * MS, MotionDelta::new(3, 3, 0));
        assert_eq!(out.delta, MotionDelta::new(3, 6, 0));
    }

    #[test]
    fn test_base_sensitivity_alone_keeps_axes_equal() {
        let mut engine = engine(AccelParams::default());
        must(engine.stage("Sensitivity", "2"));
        engine.trigger();
        let out = engine.process(4 * MS, MotionDelta::new(8, 8, 0));
        assert_eq!(out.delta, MotionDelta::new(8, 8, 0));
        assert!(engine.constants().y_ratio.is_none());

        must(engine.stage("SensitivityY", "2"));
        engine.trigger();
        let out = engine.process(1_008 * MS, MotionDelta::new(8, 8, 0));
        assert_eq!(out.delta, MotionDelta::new(8, 8, 0));
    }

    #[test]
    fn test_wheel_scale() {
        let mut params = AccelParams::default();
        params.scrolls_per_tick = Fixed::from_int(6);
        let mut engine = engine(params);
        let out = engine.process(4 * MS, MotionDelta::new(0, 0, -2));
        assert_eq!(out.delta.wheel, -4);
    }

    #[test]
    fn test_staged_field_commits_on_next_sample() {
        let mut engine = engine(AccelParams::default());
        must(engine.stage("PostScaleX", "2"));
        assert_eq!(engine.process(4 * MS, MotionDelta::new(1, 0, 0)).delta.dx, 1);
        engine.trigger();
        assert_eq!(engine.process(8 * MS, MotionDelta::new(1, 0, 0)).delta.dx, 2);
        assert_eq!(engine.counters().snapshot().commits, 1);
        assert_eq!(engine.next_commit_ns(), 8 * MS + 1_000 * MS);
    }

    #[test]
    fn test_rejected_field_is_counted() {
        let mut engine = engine(AccelParams::default());
        assert!(engine.stage("Sensitivity", "-2").is_err());
        assert!(engine.stage("NoSuchKey", "1").is_err());
        assert_eq!(engine.counters().snapshot().rejected_fields, 2);
        assert!(engine.pending().is_empty());
    }

    #[test]
    fn test_invalid_mode_reports_pass_through() {
        let mut params = AccelParams::default();
        params.mode = AccelMode::Classic.into();
        params.acceleration = Fixed::ONE;
        params.exponent = Fixed::HALF;
        let mut engine = engine(params);
        let out = engine.process(4 * MS, MotionDelta::new(40, 0, 0));
        assert_eq!(out.delta.dx, 40);
        assert_eq!(out.fault, Some(EngineFault::InvalidModeParameters));
        assert_eq!(engine.counters().snapshot().pass_through_samples, 1);
    }

    #[test]
    fn test_overflow_passes_raw_input() {
        let mut params = AccelParams::default();
        params.post_scale_x = Fixed::from_int(1_000_000);
        let mut engine = engine(params);
        let out = engine.process(4 * MS, MotionDelta::new(5_000, 7, 0));
        assert_eq!(out.delta, MotionDelta::new(5_000, 7, 0));
        assert_eq!(out.fault, Some(EngineFault::ArithmeticOverflow));
        assert_eq!(engine.carry().x, Fixed::ZERO);
        assert_eq!(engine.counters().snapshot().overflow_samples, 1);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let mut params = AccelParams::default();
        params.rotation_angle = Fixed::FRAC_PI_2;
        let mut engine = engine(params);
        let mut total = (0i64, 0i64);
        for i in 1..=100u64 {
            let out = engine.process(i * 4 * MS, MotionDelta::new(10, 0, 0));
            total.0 += i64::from(out.delta.dx);
            total.1 += i64::from(out.delta.dy);
        }
        assert!(total.0.abs() <= 1, "x drifted to {}", total.0);
        assert!((total.1 - 1_000).abs() <= 1, "y total {}", total.1);
    }

    #[test]
    fn test_angle_snap_to_horizontal() {
        let mut params = AccelParams::default();
        params.angle_snap_threshold = Fixed::from_ratio(1, 5);

        // atan(1/10) ~ 0.0997 rad, inside the window.
        let out = engine(params.clone()).process(4 * MS, MotionDelta::new(10, 1, 0));
        assert_eq!(out.delta, MotionDelta::new(10, 0, 0));

        // The opposite direction snaps too, keeping its sign.
        let out = engine(params.clone()).process(4 * MS, MotionDelta::new(-10, 1, 0));
        assert_eq!(out.delta, MotionDelta::new(-10, 0, 0));

        // Diagonal motion is left alone.
        let out = engine(params).process(4 * MS, MotionDelta::new(5, 5, 0));
        assert_eq!(out.delta, MotionDelta::new(5, 5, 0));
    }
}
