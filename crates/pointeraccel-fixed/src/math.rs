//! Bounded-iteration transcendental functions on [`Fixed`].
//!
//! Every function reduces its argument into a narrow interval and then sums
//! a fixed number of series terms, so work per call is constant. Accuracy is
//! a few ULP of Q32.32 over the reduced interval, which is far below what an
//! integer pointer delta can resolve.

use crate::value::{FRAC_BITS, Fixed};

/// `2·atanh(z)` terms for `ln`, with `z² ≤ 1/9`.
const LN_TERMS: i32 = 12;
/// Taylor terms for `exp` on `|r| ≤ ln2/2`.
const EXP_TERMS: i32 = 14;
/// Taylor terms for `sin` on `|x| ≤ π/2`.
const SIN_TERMS: i32 = 10;
/// Series terms for `atan` after two half-angle reductions.
const ATAN_TERMS: i32 = 9;

/// Above this `exp` leaves the Q32.32 range.
const EXP_UPPER: Fixed = Fixed::from_int(22);
/// Below this `exp` is smaller than one ULP.
const EXP_LOWER: Fixed = Fixed::from_int(-23);
/// `tanh` is ±1 to within one ULP beyond this.
const TANH_SATURATION: Fixed = Fixed::from_int(12);

impl Fixed {
    /// Natural logarithm. Non-positive input yields the sentinel.
    ///
    /// # RT Safety
    ///
    /// One normalization shift plus a fixed-length series.
    #[must_use]
    pub fn ln(self) -> Self {
        if self.is_overflow() || !self.is_positive() {
            return Self::OVERFLOW;
        }
        let bits = self.to_bits();
        // Highest set bit; bits > 0 so this is in 0..=62.
        let top = 63 - i32::try_from(bits.leading_zeros()).unwrap_or(63);
        let k = top - FRAC_BITS as i32;
        let mantissa = if k >= 0 {
            Self::from_bits(bits >> k)
        } else {
            Self::from_bits(bits << -k)
        };

        // ln(m) = 2·atanh((m - 1) / (m + 1)) for m in [1, 2).
        let z = (mantissa - Self::ONE) / (mantissa + Self::ONE);
        let z2 = z * z;
        let mut term = z;
        let mut sum = Self::ZERO;
        for n in 0..LN_TERMS {
            sum = sum + term.div_int(2 * n + 1);
            term = term * z2;
        }

        Self::LN_2.mul_int(k) + sum.mul_int(2)
    }

    /// Natural exponential. Results beyond the Q32.32 range yield the
    /// sentinel; results below one ULP are zero.
    #[must_use]
    pub fn exp(self) -> Self {
        if self.is_overflow() || self > EXP_UPPER {
            return Self::OVERFLOW;
        }
        if self < EXP_LOWER {
            return Self::ZERO;
        }

        // x = k·ln2 + r with |r| ≤ ln2/2.
        let k = (self / Self::LN_2 + Self::HALF).floor().to_int();
        let r = self - Self::LN_2.mul_int(k);

        let mut term = Self::ONE;
        let mut sum = Self::ONE;
        for n in 1..=EXP_TERMS {
            term = (term * r).div_int(n);
            sum = sum + term;
        }

        if sum.is_overflow() {
            return Self::OVERFLOW;
        }
        let bits = sum.to_bits();
        if k >= 0 {
            Self::from_wide(i128::from(bits) << k)
        } else {
            Self::from_bits(bits >> (-k).min(63))
        }
    }

    /// `self` raised to `exponent`, as `exp(exponent · ln self)`.
    ///
    /// A zero base gives zero for positive exponents; negative bases and a
    /// zero base with a non-positive exponent yield the sentinel.
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        if self.is_overflow() || exponent.is_overflow() {
            return Self::OVERFLOW;
        }
        if exponent == Self::ONE {
            return self;
        }
        if exponent.is_zero() {
            return Self::ONE;
        }
        if self.is_zero() {
            return if exponent.is_positive() {
                Self::ZERO
            } else {
                Self::OVERFLOW
            };
        }
        (exponent * self.ln()).exp()
    }

    /// Sine of an angle in radians.
    #[must_use]
    pub fn sin(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        // Reduce into [-π, π), then fold into [-π/2, π/2].
        let tau = i128::from(Self::TAU.to_bits());
        let pi = i128::from(Self::PI.to_bits());
        let reduced = (i128::from(self.to_bits()) + pi).rem_euclid(tau) - pi;
        let mut x = Self::from_wide(reduced);
        if x > Self::FRAC_PI_2 {
            x = Self::PI - x;
        } else if x < -Self::FRAC_PI_2 {
            x = -Self::PI - x;
        }

        let x2 = x * x;
        let mut term = x;
        let mut sum = x;
        for n in 1..SIN_TERMS {
            term = -(term * x2).div_int((2 * n) * (2 * n + 1));
            sum = sum + term;
        }
        sum
    }

    /// Cosine of an angle in radians.
    #[must_use]
    pub fn cos(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        let tau = i128::from(Self::TAU.to_bits());
        let shifted = (i128::from(self.to_bits()) + i128::from(Self::FRAC_PI_2.to_bits()))
            .rem_euclid(tau);
        Self::from_wide(shifted).sin()
    }

    /// Arctangent in radians, in `[-π/2, π/2]`.
    #[must_use]
    pub fn atan(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        let negative = self.is_negative();
        let magnitude = self.abs();
        let (mut r, inverted) = if magnitude > Self::ONE {
            (magnitude.recip(), true)
        } else {
            (magnitude, false)
        };

        // atan(x) = 2·atan(x / (1 + sqrt(1 + x²))), applied twice.
        for _ in 0..2 {
            r = r / (Self::ONE + (Self::ONE + r * r).sqrt());
        }

        let r2 = r * r;
        let mut power = r;
        let mut sum = Self::ZERO;
        for n in 0..ATAN_TERMS {
            let term = power.div_int(2 * n + 1);
            sum = if n % 2 == 0 { sum + term } else { sum - term };
            power = power * r2;
        }

        let mut angle = sum.mul_int(4);
        if inverted {
            angle = Self::FRAC_PI_2 - angle;
        }
        if negative { -angle } else { angle }
    }

    /// Four-quadrant arctangent of `y / x`, in `(-π, π]`. `atan2(0, 0)` is 0.
    #[must_use]
    pub fn atan2(y: Self, x: Self) -> Self {
        if y.is_overflow() || x.is_overflow() {
            return Self::OVERFLOW;
        }
        if x.is_zero() && y.is_zero() {
            return Self::ZERO;
        }
        let ax = x.abs();
        let ay = y.abs();
        let first_quadrant = if ay <= ax {
            (ay / ax).atan()
        } else {
            Self::FRAC_PI_2 - (ax / ay).atan()
        };
        let upper = if x.is_negative() {
            Self::PI - first_quadrant
        } else {
            first_quadrant
        };
        if y.is_negative() { -upper } else { upper }
    }

    /// Hyperbolic tangent.
    #[must_use]
    pub fn tanh(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        if self > TANH_SATURATION {
            return Self::ONE;
        }
        if self < -TANH_SATURATION {
            return -Self::ONE;
        }
        let e = self.mul_int(2).exp();
        (e - Self::ONE) / (e + Self::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn fx(v: f64) -> Fixed {
        Fixed::from_f64(v)
    }

    #[test]
    fn ln_matches_float() {
        for &v in &[1e-6, 0.01, 0.5, 1.0, 1.5, 2.0, std::f64::consts::E, 10.0, 1234.5, 2e9] {
            let q = fx(v);
            assert_abs_diff_eq!(q.ln().to_f64(), q.to_f64().ln(), epsilon = 1e-7);
        }
        assert_eq!(Fixed::ONE.ln(), Fixed::ZERO);
    }

    #[test]
    fn ln_rejects_non_positive() {
        assert!(Fixed::ZERO.ln().is_overflow());
        assert!(fx(-1.0).ln().is_overflow());
    }

    #[test]
    fn exp_matches_float() {
        for &v in &[-20.0_f64, -3.0, -0.5, 0.0, 0.1, 1.0, 5.0, 15.0, 21.0] {
            let expected = v.exp();
            let tolerance = 1e-7 * expected.max(1.0);
            assert_abs_diff_eq!(fx(v).exp().to_f64(), expected, epsilon = tolerance);
        }
        assert_eq!(Fixed::ZERO.exp(), Fixed::ONE);
    }

    #[test]
    fn exp_range_edges() {
        assert!(fx(22.5).exp().is_overflow());
        assert_eq!(fx(-40.0).exp(), Fixed::ZERO);
    }

    #[test]
    fn pow_matches_float() {
        assert_abs_diff_eq!(fx(2.0).pow(fx(10.0)).to_f64(), 1024.0, epsilon = 1e-4);
        assert_abs_diff_eq!(fx(0.3).pow(fx(2.5)).to_f64(), 0.3f64.powf(2.5), epsilon = 1e-7);
        assert_eq!(Fixed::ZERO.pow(fx(2.0)), Fixed::ZERO);
        assert!(Fixed::ZERO.pow(fx(-1.0)).is_overflow());
        assert!(fx(-2.0).pow(fx(0.5)).is_overflow());
    }

    #[test]
    fn trig_matches_float() {
        for i in -40..=40 {
            let v = f64::from(i) * 0.37;
            assert_abs_diff_eq!(fx(v).sin().to_f64(), v.sin(), epsilon = 1e-7);
            assert_abs_diff_eq!(fx(v).cos().to_f64(), v.cos(), epsilon = 1e-7);
            assert_abs_diff_eq!(fx(v).atan().to_f64(), v.atan(), epsilon = 1e-7);
            assert_abs_diff_eq!(fx(v).tanh().to_f64(), v.tanh(), epsilon = 1e-7);
        }
    }

    #[test]
    fn atan2_covers_all_quadrants() {
        let cases = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0), (3.0, 0.0), (0.0, -2.0)];
        for (y, x) in cases {
            assert_abs_diff_eq!(
                Fixed::atan2(fx(y), fx(x)).to_f64(),
                f64::atan2(y, x),
                epsilon = 1e-7
            );
        }
        assert_eq!(Fixed::atan2(Fixed::ZERO, Fixed::ZERO), Fixed::ZERO);
    }
}
