//! Per-mode constants and factor formulas.
//!
//! Each mode is a small `Copy` struct holding only the constants it needs.
//! `new` derives them from [`CurveParams`] and returns `None` when the
//! parameters cannot produce a usable curve. `evaluate` maps a positive
//! input speed to a sensitivity factor in O(1) fixed-point operations.
//!
//! With `smoothing` set, the power-law style modes return the gain form of
//! their curve, `(1/x)·∫₀ˣ f(u) du`. Output speed `x·factor` then has
//! `f` as its derivative, which is continuous at the knee.

use pointeraccel_fixed::Fixed;

use crate::params::CurveParams;

/// Logistic function, evaluated without overflow for any input.
#[inline]
fn sigmoid(z: Fixed) -> Fixed {
    if z.is_negative() {
        let e = z.exp();
        e / (Fixed::ONE + e)
    } else {
        Fixed::ONE / (Fixed::ONE + (-z).exp())
    }
}

/// `1 + slope·(x - midpoint)` where `slope = acceleration / sensitivity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    slope: Fixed,
    midpoint: Fixed,
    gain: bool,
}

impl Linear {
    /// Derive constants; requires a positive sensitivity.
    pub fn new(params: &CurveParams) -> Option<Self> {
        if !params.sensitivity.is_positive() {
            return None;
        }
        let slope = params.acceleration / params.sensitivity;
        (!slope.is_overflow()).then_some(Self {
            slope,
            midpoint: params.midpoint,
            gain: params.smoothing,
        })
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        let d = x - self.midpoint;
        if !d.is_positive() {
            return Fixed::ONE;
        }
        if self.gain {
            Fixed::ONE + self.slope * d * (d / x).div_int(2)
        } else {
            Fixed::ONE + self.slope * d
        }
    }
}

/// `1 + (a·d)^e`, optionally capped so the factor approaches `motivity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power {
    exponent: Fixed,
    exponent_ln_scale: Fixed,
    inv_exponent_plus_one: Fixed,
    cap_span: Option<Fixed>,
    midpoint: Fixed,
    gain: bool,
}

impl Power {
    /// Derive constants; requires positive acceleration and exponent.
    pub fn new(params: &CurveParams) -> Option<Self> {
        let a = params.acceleration;
        let e = params.exponent;
        if !a.is_positive() || !e.is_positive() {
            return None;
        }
        let cap_span = (params.motivity > Fixed::ONE).then(|| params.motivity - Fixed::ONE);
        let constants = Self {
            exponent: e,
            exponent_ln_scale: e * a.ln(),
            inv_exponent_plus_one: (e + Fixed::ONE).recip(),
            cap_span,
            midpoint: params.midpoint,
            gain: params.smoothing,
        };
        (!constants.exponent_ln_scale.is_overflow()).then_some(constants)
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        let d = x - self.midpoint;
        if !d.is_positive() {
            return Fixed::ONE;
        }
        let mut g = (self.exponent * d.ln() + self.exponent_ln_scale).exp();
        if self.gain && !g.is_overflow() {
            g = g * (d / x) * self.inv_exponent_plus_one;
        }
        match self.cap_span {
            // Beyond the Q32.32 range the capped curve has reached its bound.
            Some(span) if g.is_overflow() => Fixed::ONE + span,
            Some(span) => Fixed::ONE + span * (g / (span + g)),
            None => Fixed::ONE + g,
        }
    }
}

/// `1 + (a·d)^(e-1)` above the midpoint, 1 below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classic {
    power: Fixed,
    power_ln_scale: Fixed,
    inv_exponent: Fixed,
    midpoint: Fixed,
    gain: bool,
}

impl Classic {
    /// Derive constants; requires positive acceleration and an exponent
    /// above one.
    pub fn new(params: &CurveParams) -> Option<Self> {
        let a = params.acceleration;
        let e = params.exponent;
        if !a.is_positive() || e <= Fixed::ONE {
            return None;
        }
        let power = e - Fixed::ONE;
        let constants = Self {
            power,
            power_ln_scale: power * a.ln(),
            inv_exponent: e.recip(),
            midpoint: params.midpoint,
            gain: params.smoothing,
        };
        (!constants.power_ln_scale.is_overflow()).then_some(constants)
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        let d = x - self.midpoint;
        if !d.is_positive() {
            return Fixed::ONE;
        }
        let g = (self.power * d.ln() + self.power_ln_scale).exp();
        if self.gain {
            Fixed::ONE + g * (d / x) * self.inv_exponent
        } else {
            Fixed::ONE + g
        }
    }
}

/// Log-sigmoid from `1/motivity` up to `motivity`, centred on the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motivity {
    growth: Fixed,
    ln_midpoint: Fixed,
    span: Fixed,
    half_span: Fixed,
}

impl Motivity {
    /// Derive constants; requires `motivity > 1`, a positive midpoint and
    /// a positive growth rate.
    pub fn new(params: &CurveParams) -> Option<Self> {
        if params.motivity <= Fixed::ONE
            || !params.midpoint.is_positive()
            || !params.acceleration.is_positive()
        {
            return None;
        }
        let span = params.motivity.ln().mul_int(2);
        let constants = Self {
            growth: params.acceleration,
            ln_midpoint: params.midpoint.ln(),
            span,
            half_span: span.div_int(2),
        };
        (!constants.ln_midpoint.is_overflow() && !span.is_overflow()).then_some(constants)
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        if !x.is_positive() {
            return Fixed::ONE;
        }
        let z = self.growth * (x.ln() - self.ln_midpoint);
        (self.span * sigmoid(z) - self.half_span).exp()
    }
}

/// Curve symmetric in log space around a synchronization speed, reaching
/// `motivity` above it and `1/motivity` below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synchronous {
    ln_sync: Fixed,
    ln_motivity: Fixed,
    gamma_scaled: Fixed,
    /// `(k, 1/k)` with `k = 0.5 / smoothness`; `None` for a sharp clamp.
    smooth: Option<(Fixed, Fixed)>,
}

impl Synchronous {
    /// Derive constants; requires a positive sync speed, positive gamma,
    /// `motivity > 1` and non-negative smoothness.
    pub fn new(params: &CurveParams) -> Option<Self> {
        let sync = params.acceleration;
        let gamma = params.exponent;
        let smoothness = params.midpoint;
        if !sync.is_positive()
            || !gamma.is_positive()
            || params.motivity <= Fixed::ONE
            || smoothness.is_negative()
        {
            return None;
        }
        let ln_motivity = params.motivity.ln();
        let smooth = if smoothness.is_zero() {
            None
        } else {
            let k = Fixed::HALF / smoothness;
            Some((k, k.recip()))
        };
        let constants = Self {
            ln_sync: sync.ln(),
            ln_motivity,
            gamma_scaled: gamma / ln_motivity,
            smooth,
        };
        let valid = !constants.ln_sync.is_overflow()
            && !constants.gamma_scaled.is_overflow()
            && smooth.is_none_or(|(k, inv)| !k.is_overflow() && !inv.is_overflow());
        valid.then_some(constants)
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        if !x.is_positive() {
            return Fixed::ONE;
        }
        let d = x.ln() - self.ln_sync;
        let r = (self.gamma_scaled * d).abs();
        let shaped = match self.smooth {
            None => r.min(Fixed::ONE),
            Some((k, inv_k)) => {
                let rk = r.pow(k);
                // r^k past the Q32.32 range means tanh has saturated.
                let t = if rk.is_overflow() { Fixed::ONE } else { rk.tanh() };
                t.pow(inv_k)
            }
        };
        (d.signum() * self.ln_motivity * shaped).exp()
    }
}

/// Step of height `acceleration` at the midpoint, optionally a logistic
/// ramp with steepness `exponent / midpoint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    midpoint: Fixed,
    height: Fixed,
    steepness: Option<Fixed>,
}

impl Jump {
    /// Derive constants. The smooth form needs a positive exponent and a
    /// positive midpoint.
    pub fn new(params: &CurveParams) -> Option<Self> {
        let steepness = if params.smoothing {
            if !params.exponent.is_positive() || !params.midpoint.is_positive() {
                return None;
            }
            let s = params.exponent / params.midpoint;
            if s.is_overflow() {
                return None;
            }
            Some(s)
        } else {
            None
        };
        Some(Self {
            midpoint: params.midpoint,
            height: params.acceleration,
            steepness,
        })
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        match self.steepness {
            Some(s) => Fixed::ONE + self.height * sigmoid(s * (x - self.midpoint)),
            None if x >= self.midpoint => Fixed::ONE + self.height,
            None => Fixed::ONE,
        }
    }
}

/// `1 + ln(1 + a·d)` above the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Natural {
    scale: Fixed,
    inv_scale: Fixed,
    midpoint: Fixed,
    gain: bool,
}

impl Natural {
    /// Derive constants; requires a positive acceleration.
    pub fn new(params: &CurveParams) -> Option<Self> {
        let a = params.acceleration;
        if !a.is_positive() {
            return None;
        }
        let inv_scale = a.recip();
        (!inv_scale.is_overflow()).then_some(Self {
            scale: a,
            inv_scale,
            midpoint: params.midpoint,
            gain: params.smoothing,
        })
    }

    /// Factor at speed `x`.
    #[inline]
    pub fn evaluate(&self, x: Fixed) -> Fixed {
        let d = x - self.midpoint;
        if !d.is_positive() {
            return Fixed::ONE;
        }
        let t = self.scale * d;
        let l = (Fixed::ONE + t).ln();
        if self.gain {
            let integral = ((Fixed::ONE + t) * l - t) * self.inv_scale;
            Fixed::ONE + integral / x
        } else {
            Fixed::ONE + l
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::AccelMode;
    use approx::assert_abs_diff_eq;

    fn params(mode: AccelMode) -> CurveParams {
        CurveParams {
            mode: mode.into(),
            ..CurveParams::default()
        }
    }

    fn fx(v: f64) -> Fixed {
        Fixed::from_f64(v)
    }

    #[test]
    fn sigmoid_is_bounded_and_centred() {
        assert_eq!(sigmoid(Fixed::ZERO), Fixed::HALF);
        assert!(sigmoid(fx(-1000.0)) >= Fixed::ZERO);
        assert!(sigmoid(fx(1000.0)) <= Fixed::ONE);
        assert_abs_diff_eq!(sigmoid(fx(2.0)).to_f64(), 1.0 / (1.0 + (-2.0f64).exp()), epsilon = 1e-8);
    }

    #[test]
    fn linear_slope_is_normalized_by_sensitivity() {
        let p = CurveParams {
            acceleration: fx(0.5),
            sensitivity: fx(2.0),
            ..params(AccelMode::Linear)
        };
        let Some(c) = Linear::new(&p) else {
            panic!("linear constants rejected");
        };
        // 1 + (0.5 / 2) * 4
        assert_eq!(c.evaluate(fx(4.0)), fx(2.0));
        assert_eq!(c.evaluate(fx(-1.0)), Fixed::ONE);
    }

    #[test]
    fn linear_gain_is_continuous_at_the_knee() {
        let p = CurveParams {
            acceleration: fx(0.1),
            midpoint: fx(5.0),
            smoothing: true,
            ..params(AccelMode::Linear)
        };
        let Some(c) = Linear::new(&p) else {
            panic!("linear constants rejected");
        };
        assert_eq!(c.evaluate(fx(5.0)), Fixed::ONE);
        assert!((c.evaluate(fx(5.001)) - Fixed::ONE).to_f64() < 1e-6);
        // 1 + 0.1 * 25 / 20
        assert_abs_diff_eq!(c.evaluate(fx(10.0)).to_f64(), 1.125, epsilon = 1e-8);
    }

    #[test]
    fn power_matches_closed_form() {
        let p = CurveParams {
            acceleration: fx(0.2),
            exponent: fx(1.5),
            ..params(AccelMode::Power)
        };
        let Some(c) = Power::new(&p) else {
            panic!("power constants rejected");
        };
        let expected = 1.0 + (0.2f64 * 10.0).powf(1.5);
        assert_abs_diff_eq!(c.evaluate(fx(10.0)).to_f64(), expected, epsilon = 1e-6);
    }

    #[test]
    fn power_cap_bounds_the_factor() {
        let p = CurveParams {
            acceleration: fx(1.0),
            exponent: fx(2.0),
            motivity: fx(3.0),
            ..params(AccelMode::Power)
        };
        let Some(c) = Power::new(&p) else {
            panic!("power constants rejected");
        };
        for x in [1.0, 10.0, 1000.0, 1.0e6] {
            assert!(c.evaluate(fx(x)) <= fx(3.0));
        }
        assert!(c.evaluate(fx(1.0e6)) > fx(2.99));
    }

    #[test]
    fn power_rejects_non_positive_parameters() {
        assert!(Power::new(&params(AccelMode::Power)).is_none());
    }

    #[test]
    fn classic_requires_exponent_above_one() {
        let p = CurveParams {
            acceleration: fx(0.1),
            exponent: fx(1.0),
            ..params(AccelMode::Classic)
        };
        assert!(Classic::new(&p).is_none());
        let p = CurveParams { exponent: fx(2.0), midpoint: fx(2.0), ..p };
        let Some(c) = Classic::new(&p) else {
            panic!("classic constants rejected");
        };
        assert_eq!(c.evaluate(fx(1.5)), Fixed::ONE);
        // 1 + (0.1 * 8)^1
        assert_abs_diff_eq!(c.evaluate(fx(10.0)).to_f64(), 1.8, epsilon = 1e-7);
    }

    #[test]
    fn motivity_is_bounded_and_centred() {
        let p = CurveParams {
            acceleration: fx(1.0),
            midpoint: fx(10.0),
            motivity: fx(1.5),
            ..params(AccelMode::Motivity)
        };
        let Some(c) = Motivity::new(&p) else {
            panic!("motivity constants rejected");
        };
        assert_abs_diff_eq!(c.evaluate(fx(10.0)).to_f64(), 1.0, epsilon = 1e-7);
        assert!(c.evaluate(fx(1.0e6)).to_f64() <= 1.5 + 1e-6);
        assert!(c.evaluate(fx(0.001)) >= fx(1.0 / 1.5 - 1e-6));
    }

    #[test]
    fn synchronous_is_symmetric_in_log_space() {
        let p = CurveParams {
            acceleration: fx(8.0),
            exponent: fx(1.0),
            midpoint: fx(0.5),
            motivity: fx(2.0),
            ..params(AccelMode::Synchronous)
        };
        let Some(c) = Synchronous::new(&p) else {
            panic!("synchronous constants rejected");
        };
        assert_abs_diff_eq!(c.evaluate(fx(8.0)).to_f64(), 1.0, epsilon = 1e-7);
        let above = c.evaluate(fx(16.0)).to_f64();
        let below = c.evaluate(fx(4.0)).to_f64();
        assert_abs_diff_eq!(above * below, 1.0, epsilon = 1e-5);
        assert!(c.evaluate(fx(1.0e5)).to_f64() <= 2.0 + 1e-6);
    }

    #[test]
    fn synchronous_sharp_clamps_at_motivity() {
        let p = CurveParams {
            acceleration: fx(8.0),
            exponent: fx(1.0),
            midpoint: Fixed::ZERO,
            motivity: fx(2.0),
            ..params(AccelMode::Synchronous)
        };
        let Some(c) = Synchronous::new(&p) else {
            panic!("synchronous constants rejected");
        };
        assert_abs_diff_eq!(c.evaluate(fx(1000.0)).to_f64(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn jump_steps_at_midpoint() {
        let p = CurveParams {
            acceleration: fx(0.5),
            midpoint: fx(20.0),
            ..params(AccelMode::Jump)
        };
        let Some(c) = Jump::new(&p) else {
            panic!("jump constants rejected");
        };
        assert_eq!(c.evaluate(fx(19.99)), Fixed::ONE);
        assert_eq!(c.evaluate(fx(20.0)), fx(1.5));
    }

    #[test]
    fn smooth_jump_is_half_way_at_midpoint() {
        let p = CurveParams {
            acceleration: fx(0.5),
            exponent: fx(10.0),
            midpoint: fx(20.0),
            smoothing: true,
            ..params(AccelMode::Jump)
        };
        let Some(c) = Jump::new(&p) else {
            panic!("jump constants rejected");
        };
        assert_eq!(c.evaluate(fx(20.0)), fx(1.25));
        assert!(c.evaluate(fx(19.9)) < fx(1.25));
        assert!(c.evaluate(fx(20.1)) > fx(1.25));
    }

    #[test]
    fn natural_grows_logarithmically() {
        let p = CurveParams {
            acceleration: fx(0.5),
            ..params(AccelMode::Natural)
        };
        let Some(c) = Natural::new(&p) else {
            panic!("natural constants rejected");
        };
        assert_abs_diff_eq!(c.evaluate(fx(2.0)).to_f64(), 1.0 + 2.0f64.ln(), epsilon = 1e-7);
        let gain = Natural::new(&CurveParams { smoothing: true, ..p });
        let Some(g) = gain else {
            panic!("natural constants rejected");
        };
        // ((1 + 1) ln 2 - 1) / (0.5 * 2)
        assert_abs_diff_eq!(g.evaluate(fx(2.0)).to_f64(), 1.0 + 2.0 * 2.0f64.ln() - 1.0, epsilon = 1e-7);
    }
}
