//! Lookup table export with curvature-weighted sampling.
//!
//! A table of N points interpolates linearly, so its error concentrates
//! where the curve bends. Abscissas are placed by equidistributing a
//! sampling mass: the curve's turning angle, blended with a uniform share
//! so flat stretches are never left empty.

use pointeraccel_curves::{LUT_CAPACITY, LutTable};
use pointeraccel_errors::{CurveEditError, Result};
use pointeraccel_fixed::Fixed;
use tracing::debug;

use crate::bezier::Point;
use crate::curve::CustomCurve;

/// Smallest exportable table.
pub const MIN_TABLE_SIZE: usize = 2;

/// Share of the sampling mass spread uniformly over x.
pub const UNIFORM_SHARE: f64 = 0.25;

/// Dense polyline resolution used to measure turning.
const DENSE_PER_SEGMENT: usize = 64;

/// Total turning (radians) below which the curve counts as straight.
const MIN_TURNING: f64 = 1e-9;

impl CustomCurve {
    /// Export a table of `size` points for the table-driven modes.
    ///
    /// The first and last points sit on the end anchors. Points that
    /// collapse onto the same fixed-point x are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError::TableSize`] unless
    /// `MIN_TABLE_SIZE <= size <= LUT_CAPACITY`, or a lookup table error
    /// if a coordinate does not fit the fixed-point range.
    pub fn export_lut(&self, size: usize) -> Result<LutTable> {
        let abscissas = self.lut_abscissas(size)?;
        let mut points: Vec<(Fixed, Fixed)> = Vec::with_capacity(abscissas.len());
        for x in abscissas {
            let point = (Fixed::from_f64(x), Fixed::from_f64(self.sample(x)));
            let coincident = points.last().is_some_and(|(prev, _)| point.0 <= *prev);
            if coincident && !point.0.is_overflow() {
                continue;
            }
            points.push(point);
        }
        if points.len() < size {
            debug!(requested = size, kept = points.len(), "coincident table points dropped");
        }
        Ok(LutTable::new(&points)?)
    }

    /// Abscissas chosen for a table of `size` points, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError::TableSize`] for an unsupported size.
    pub fn lut_abscissas(&self, size: usize) -> std::result::Result<Vec<f64>, CurveEditError> {
        if !(MIN_TABLE_SIZE..=LUT_CAPACITY).contains(&size) {
            return Err(CurveEditError::TableSize {
                requested: size,
                min: MIN_TABLE_SIZE,
                max: LUT_CAPACITY,
            });
        }

        let dense = self.dense_polyline();
        let masses = sampling_mass(&dense);
        let (min, max) = self.domain();

        let mut xs = Vec::with_capacity(size);
        xs.push(min);
        let mut cumulative = 0.0;
        let mut intervals = dense.iter().zip(dense.iter().skip(1)).zip(masses.iter());
        let mut current = intervals.next();
        for k in 1..size - 1 {
            let target = k as f64 / (size - 1) as f64;
            while let Some((_, mass)) = current {
                if cumulative + mass >= target {
                    break;
                }
                cumulative += mass;
                current = intervals.next();
            }
            let x = match current {
                Some(((from, to), mass)) if *mass > 0.0 => {
                    from.0 + (to.0 - from.0) * ((target - cumulative) / mass).clamp(0.0, 1.0)
                }
                Some(((from, _), _)) => from.0,
                None => max,
            };
            xs.push(x);
        }
        xs.push(max);
        Ok(xs)
    }

    /// The plot polyline as raw `(x, y)` points, for tools that consume a
    /// plain point list instead of a fixed-size table.
    #[must_use]
    pub fn export_points(&self) -> Vec<Point> {
        self.plot().to_vec()
    }

    fn dense_polyline(&self) -> Vec<Point> {
        let mut dense = Vec::with_capacity(self.segment_count() * DENSE_PER_SEGMENT + 1);
        for segment in self.segments() {
            for k in 0..DENSE_PER_SEGMENT {
                dense.push(segment.evaluate(k as f64 / DENSE_PER_SEGMENT as f64));
            }
        }
        if let Some(last) = self.anchors().last() {
            dense.push(last.point());
        }
        dense
    }
}

/// Normalized sampling mass per polyline interval; sums to one.
fn sampling_mass(dense: &[Point]) -> Vec<f64> {
    let chords: Vec<Point> = dense
        .iter()
        .zip(dense.iter().skip(1))
        .map(|(a, b)| (b.0 - a.0, b.1 - a.1))
        .collect();

    // Turning at each interior vertex, split between its two intervals.
    let mut turning = vec![0.0; chords.len()];
    for (i, (a, b)) in chords.iter().zip(chords.iter().skip(1)).enumerate() {
        let angle = (a.0 * b.1 - a.1 * b.0).atan2(a.0 * b.0 + a.1 * b.1).abs();
        if let Some(left) = turning.get_mut(i) {
            *left += 0.5 * angle;
        }
        if let Some(right) = turning.get_mut(i + 1) {
            *right += 0.5 * angle;
        }
    }

    let total_turning: f64 = turning.iter().sum();
    let total_x: f64 = chords.iter().map(|c| c.0).sum();
    let uniform_share = if total_turning > MIN_TURNING {
        UNIFORM_SHARE
    } else {
        1.0
    };

    chords
        .iter()
        .zip(turning)
        .map(|(chord, turn)| {
            let uniform = if total_x > 0.0 { chord.0 / total_x } else { 0.0 };
            let curved = if total_turning > MIN_TURNING {
                turn / total_turning
            } else {
                0.0
            };
            uniform_share * uniform + (1.0 - uniform_share) * curved
        })
        .collect()
}
