//! Cubic Bezier segment between two anchors.

use serde::{Deserialize, Serialize};

/// A point in the curve plane: x is input speed, y is the factor.
pub type Point = (f64, f64);

const MAX_ITERATIONS: usize = 8;
const EPSILON: f64 = 1e-9;

/// One cubic segment `P0 P1 P2 P3`, where `P0` and `P3` are anchors.
///
/// Evaluation is offline only. The runtime sees this curve through an
/// exported lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    /// Control points P0, P1, P2, P3.
    pub points: [Point; 4],
}

impl CubicSegment {
    /// Build a segment from its four points.
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// A straight segment with controls at one and two thirds.
    #[must_use]
    pub fn straight(from: Point, to: Point) -> Self {
        let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        Self::new(from, lerp(1.0 / 3.0), lerp(2.0 / 3.0), to)
    }

    /// Evaluate at parameter `t` (clamped to `[0, 1]`).
    ///
    /// Uses `B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = self.points;

        let x = mt3 * x0 + 3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3 * x3;
        let y = mt3 * y0 + 3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3 * y3;

        (x, y)
    }

    /// First derivative `B'(t)`, itself a quadratic Bezier:
    /// `3[(1-t)²(P₁-P₀) + 2(1-t)t(P₂-P₁) + t²(P₃-P₂)]`.
    #[inline]
    #[must_use]
    pub fn derivative(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = self.points;
        let blend = |d0: f64, d1: f64, d2: f64| 3.0 * (mt * mt * d0 + 2.0 * mt * t * d1 + t * t * d2);
        (
            blend(x1 - x0, x2 - x1, x3 - x2),
            blend(y1 - y0, y2 - y1, y3 - y2),
        )
    }

    /// Find `t` with `x(t) == target_x`.
    ///
    /// Newton-Raphson from a linear guess, falling back to bisection when
    /// a step leaves the bracket or the slope vanishes. Assumes `x(t)` is
    /// non-decreasing, which constraint enforcement guarantees.
    #[must_use]
    pub fn t_for_x(&self, target_x: f64) -> f64 {
        let x0 = self.points[0].0;
        let x3 = self.points[3].0;
        if target_x <= x0 {
            return 0.0;
        }
        if target_x >= x3 {
            return 1.0;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut t = (target_x - x0) / (x3 - x0);

        for _ in 0..MAX_ITERATIONS * 8 {
            let (x, _) = self.evaluate(t);
            let error = x - target_x;
            if error.abs() < EPSILON {
                break;
            }
            if error < 0.0 {
                lo = t;
            } else {
                hi = t;
            }

            let (dx_dt, _) = self.derivative(t);
            let newton = t - error / dx_dt;
            t = if dx_dt.abs() > EPSILON && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
            if hi - lo < EPSILON {
                break;
            }
        }

        t
    }

    /// The y value where the segment crosses `x`.
    #[must_use]
    pub fn y_at(&self, x: f64) -> f64 {
        self.evaluate(self.t_for_x(x)).1
    }

    /// Split at `t` with De Casteljau. Both halves trace the original.
    #[must_use]
    pub fn split(&self, t: f64) -> (CubicSegment, CubicSegment) {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: Point, b: Point| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
        let [p0, p1, p2, p3] = self.points;
        let p01 = lerp(p0, p1);
        let p12 = lerp(p1, p2);
        let p23 = lerp(p2, p3);
        let p012 = lerp(p01, p12);
        let p123 = lerp(p12, p23);
        let mid = lerp(p012, p123);
        (
            CubicSegment::new(p0, p01, p012, mid),
            CubicSegment::new(mid, p123, p23, p3),
        )
    }

    /// Whether `x(t)` never decreases over the segment.
    ///
    /// The x-derivative is a quadratic Bernstein polynomial with
    /// coefficients `a, b, c`; it stays non-negative iff `a, c >= 0` and
    /// `b >= -sqrt(ac)`.
    #[must_use]
    pub fn is_x_monotone(&self) -> bool {
        let [(x0, _), (x1, _), (x2, _), (x3, _)] = self.points;
        let (a, b, c) = (x1 - x0, x2 - x1, x3 - x2);
        a >= 0.0 && c >= 0.0 && (b >= 0.0 || b * b <= a * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn s_curve() -> CubicSegment {
        CubicSegment::new((0.0, 0.0), (0.6, 0.0), (0.4, 1.0), (1.0, 1.0))
    }

    #[test]
    fn test_endpoints() {
        let segment = s_curve();
        assert_eq!(segment.evaluate(0.0), (0.0, 0.0));
        assert_eq!(segment.evaluate(1.0), (1.0, 1.0));
        assert_eq!(segment.evaluate(-3.0), (0.0, 0.0));
    }

    #[test]
    fn test_straight_is_linear() {
        let segment = CubicSegment::straight((2.0, 1.0), (8.0, 4.0));
        for x in [2.0, 3.5, 5.0, 7.9] {
            assert_abs_diff_eq!(segment.y_at(x), 1.0 + (x - 2.0) * 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_t_for_x_hits_target() {
        let segment = s_curve();
        for i in 1..20 {
            let target = f64::from(i) / 20.0;
            let t = segment.t_for_x(target);
            assert_abs_diff_eq!(segment.evaluate(t).0, target, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_t_for_x_flat_start() {
        // Zero slope at t = 0 must not stall the solver.
        let segment = CubicSegment::new((0.0, 0.0), (0.0, 0.5), (1.0, 0.5), (1.0, 1.0));
        let t = segment.t_for_x(0.001);
        assert_abs_diff_eq!(segment.evaluate(t).0, 0.001, epsilon = 1e-7);
    }

    #[test]
    fn test_split_preserves_shape() {
        let segment = s_curve();
        let (left, right) = segment.split(0.3);
        let mid = segment.evaluate(0.3);
        assert_eq!(left.points[3], mid);
        assert_eq!(right.points[0], mid);
        for i in 0..=10 {
            let u = f64::from(i) / 10.0;
            let a = left.evaluate(u);
            let b = segment.evaluate(0.3 * u);
            assert_abs_diff_eq!(a.0, b.0, epsilon = 1e-12);
            assert_abs_diff_eq!(a.1, b.1, epsilon = 1e-12);
            let c = right.evaluate(u);
            let d = segment.evaluate(0.3 + 0.7 * u);
            assert_abs_diff_eq!(c.0, d.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.1, d.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monotone_check() {
        assert!(s_curve().is_x_monotone());
        let folded = CubicSegment::new((0.0, 0.0), (2.0, 0.0), (-1.0, 1.0), (1.0, 1.0));
        assert!(!folded.is_x_monotone());
        let backward = CubicSegment::new((0.0, 0.0), (-0.1, 0.0), (0.5, 1.0), (1.0, 1.0));
        assert!(!backward.is_x_monotone());
    }
}
