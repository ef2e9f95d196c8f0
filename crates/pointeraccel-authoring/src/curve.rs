//! Editable anchor/Bezier curve.

use pointeraccel_errors::CurveEditError;
use serde::Serialize;
use tracing::debug;

use crate::bezier::{CubicSegment, Point};

/// Fraction of a segment's span a control point must keep away from the
/// far anchor.
pub const CURVE_MARGIN: f64 = 0.2;

/// Smallest x distance between neighbouring anchors.
pub const MIN_ANCHOR_GAP: f64 = 0.01;

/// Plot fragments per Bezier segment.
pub const PLOT_FRAGMENTS: usize = 50;

/// A curve always keeps at least this many anchors.
pub const MIN_ANCHORS: usize = 2;

/// A point the curve passes through.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Anchor {
    /// Input speed.
    pub x: f64,
    /// Factor at `x`.
    pub y: f64,
    /// Refuses drags and removal.
    pub locked: bool,
    /// Dragging one control rotates the opposite control about this anchor
    /// so the tangent stays continuous. Handle lengths are kept.
    pub polar: bool,
}

impl Anchor {
    /// An unlocked cartesian anchor.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            locked: false,
            polar: false,
        }
    }

    /// Position as a point.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point {
        (self.x, self.y)
    }
}

/// Control points of the segment between anchors `i` and `i + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ControlPair {
    /// Handle attached to the left anchor.
    pub start: Point,
    /// Handle attached to the right anchor.
    pub end: Point,
}

impl ControlPair {
    /// Build a control pair.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Which handle of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSide {
    /// The handle attached to the segment's left anchor.
    Start,
    /// The handle attached to the segment's right anchor.
    End,
}

/// A piecewise cubic Bezier curve through ordered anchors.
///
/// Every edit re-applies the constraints and refreshes the plot, so after
/// any public call the curve is a single-valued function of x: anchors
/// are at least [`MIN_ANCHOR_GAP`] apart and each handle stays on its own
/// segment, no closer than [`CURVE_MARGIN`] of the span to the far anchor.
///
/// # Example
///
/// ```
/// use pointeraccel_authoring::CustomCurve;
///
/// let mut curve = CustomCurve::default();
/// let index = curve.add_anchor(20.0, 1.8)?;
/// assert_eq!(index, 1);
/// assert!((curve.sample(20.0) - 1.8).abs() < 1e-6);
/// # Ok::<(), pointeraccel_errors::CurveEditError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomCurve {
    anchors: Vec<Anchor>,
    controls: Vec<ControlPair>,
    #[serde(skip)]
    plot: Vec<Point>,
}

impl Default for CustomCurve {
    fn default() -> Self {
        let mut curve = Self {
            anchors: vec![Anchor::new(5.0, 1.0), Anchor::new(50.0, 2.0)],
            controls: vec![ControlPair::new((40.0, 1.0), (20.0, 2.0))],
            plot: Vec::new(),
        };
        curve.update_plot();
        curve
    }
}

impl CustomCurve {
    /// A curve of straight segments through `points`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError`] for fewer than [`MIN_ANCHORS`] points, a
    /// non-finite coordinate or x values closer than [`MIN_ANCHOR_GAP`].
    pub fn through(points: &[Point]) -> Result<Self, CurveEditError> {
        if points.len() < MIN_ANCHORS {
            return Err(CurveEditError::TooFewAnchors { min: MIN_ANCHORS });
        }
        let mut previous: Option<f64> = None;
        for &(x, y) in points {
            check_finite((x, y))?;
            if previous.is_some_and(|p| x < p + MIN_ANCHOR_GAP) {
                return Err(CurveEditError::DuplicateX(x));
            }
            previous = Some(x);
        }
        let anchors = points.iter().map(|&(x, y)| Anchor::new(x, y)).collect();
        let controls = points
            .iter()
            .zip(points.iter().skip(1))
            .map(|(&from, &to)| {
                let segment = CubicSegment::straight(from, to);
                ControlPair::new(segment.points[1], segment.points[2])
            })
            .collect();
        Ok(Self::from_parts(anchors, controls))
    }

    /// Assemble from validated parts and normalize.
    pub(crate) fn from_parts(anchors: Vec<Anchor>, controls: Vec<ControlPair>) -> Self {
        let mut curve = Self {
            anchors,
            controls,
            plot: Vec::new(),
        };
        curve.apply_constraints();
        curve.update_plot();
        curve
    }

    /// Anchors in x order.
    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// One control pair per segment.
    #[must_use]
    pub fn controls(&self) -> &[ControlPair] {
        &self.controls
    }

    /// Number of Bezier segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.controls.len()
    }

    /// Segment `index` as a cubic.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CubicSegment> {
        let pair = self.controls.get(index)?;
        let left = self.anchors.get(index)?;
        let right = self.anchors.get(index + 1)?;
        Some(CubicSegment::new(
            left.point(),
            pair.start,
            pair.end,
            right.point(),
        ))
    }

    /// All segments, left to right.
    pub fn segments(&self) -> impl Iterator<Item = CubicSegment> + '_ {
        (0..self.segment_count()).filter_map(|i| self.segment(i))
    }

    /// First and last anchor x.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        let min = self.anchors.first().map_or(0.0, |a| a.x);
        let max = self.anchors.last().map_or(min, |a| a.x);
        (min, max)
    }

    /// Plot samples, [`PLOT_FRAGMENTS`] per segment plus the final anchor.
    #[must_use]
    pub fn plot(&self) -> &[Point] {
        &self.plot
    }

    /// Curve value at `x`. Outside the domain the end anchor's y is held.
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        let (Some(first), Some(last)) = (self.anchors.first(), self.anchors.last()) else {
            return 1.0;
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        let index = self.anchors.partition_point(|a| a.x <= x).saturating_sub(1);
        self.segment(index).map_or(last.y, |segment| segment.y_at(x))
    }

    /// Insert an anchor at `(x, y)` inside the domain.
    ///
    /// The enclosing segment is split at `x` so the curve keeps its shape,
    /// then the new anchor and its two handles are moved to `y`. Returns
    /// the new anchor's index.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError`] if a coordinate is not finite, an anchor
    /// sits within [`MIN_ANCHOR_GAP`] of `x`, or `x` is outside the domain.
    pub fn add_anchor(&mut self, x: f64, y: f64) -> Result<usize, CurveEditError> {
        check_finite((x, y))?;
        if self
            .anchors
            .iter()
            .any(|a| (a.x - x).abs() < MIN_ANCHOR_GAP)
        {
            return Err(CurveEditError::DuplicateX(x));
        }
        let (min, max) = self.domain();
        if x < min || x > max {
            return Err(CurveEditError::OutsideDomain { x, min, max });
        }

        let index = self.anchors.partition_point(|a| a.x < x).saturating_sub(1);
        let segment = self.segment(index).ok_or(CurveEditError::NoSuchSegment {
            index,
            len: self.segment_count(),
        })?;
        let (left, right) = segment.split(segment.t_for_x(x));
        let mid = left.points[3];
        let shift = (x - mid.0, y - mid.1);

        let pair = self.controls.get_mut(index).ok_or(CurveEditError::NoSuchSegment {
            index,
            len: 0,
        })?;
        *pair = ControlPair::new(left.points[1], offset(left.points[2], shift));
        self.controls.insert(
            index + 1,
            ControlPair::new(offset(right.points[1], shift), right.points[2]),
        );
        self.anchors.insert(index + 1, Anchor::new(x, y));

        self.refresh();
        debug!(index = index + 1, x, y, "anchor added");
        Ok(index + 1)
    }

    /// Move anchor `index` to `(x, y)`, dragging its handles along.
    ///
    /// `x` is clamped to keep [`MIN_ANCHOR_GAP`] from the neighbours and
    /// to stay non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError`] for a missing or locked anchor, or a
    /// non-finite coordinate.
    pub fn move_anchor(&mut self, index: usize, x: f64, y: f64) -> Result<(), CurveEditError> {
        check_finite((x, y))?;
        let anchor = *self.anchor(index)?;
        if anchor.locked {
            return Err(CurveEditError::Locked(index));
        }

        let lower = match index.checked_sub(1).and_then(|i| self.anchors.get(i)) {
            Some(prev) => prev.x + MIN_ANCHOR_GAP,
            None => 0.0,
        };
        let upper = self
            .anchors
            .get(index + 1)
            .map_or(f64::INFINITY, |next| next.x - MIN_ANCHOR_GAP);
        let x = x.clamp(lower, upper.max(lower));
        let shift = (x - anchor.x, y - anchor.y);

        if let Some(incoming) = index.checked_sub(1).and_then(|i| self.controls.get_mut(i)) {
            incoming.end = offset(incoming.end, shift);
        }
        if let Some(outgoing) = self.controls.get_mut(index) {
            outgoing.start = offset(outgoing.start, shift);
        }
        if let Some(target) = self.anchors.get_mut(index) {
            target.x = x;
            target.y = y;
        }

        self.refresh();
        Ok(())
    }

    /// Move one handle of `segment` to `to`.
    ///
    /// When the handle's anchor is polar and has a handle on the other
    /// side, that handle is rotated to stay collinear.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError`] for a missing segment or a non-finite
    /// coordinate.
    pub fn move_control(
        &mut self,
        segment: usize,
        side: ControlSide,
        to: Point,
    ) -> Result<(), CurveEditError> {
        check_finite(to)?;
        let len = self.segment_count();
        let pair = self
            .controls
            .get_mut(segment)
            .ok_or(CurveEditError::NoSuchSegment { index: segment, len })?;
        let (anchor_index, opposite) = match side {
            ControlSide::Start => {
                pair.start = to;
                (segment, segment.checked_sub(1).map(|s| (s, ControlSide::End)))
            }
            ControlSide::End => {
                pair.end = to;
                (
                    segment + 1,
                    (segment + 1 < len).then_some((segment + 1, ControlSide::Start)),
                )
            }
        };

        if let (Some(anchor), Some((other, other_side))) = (self.anchors.get(anchor_index), opposite) {
            if anchor.polar {
                let pivot = anchor.point();
                if let Some(pair) = self.controls.get_mut(other) {
                    let handle = match other_side {
                        ControlSide::Start => &mut pair.start,
                        ControlSide::End => &mut pair.end,
                    };
                    *handle = mirror_direction(pivot, to, *handle);
                }
            }
        }

        self.refresh();
        Ok(())
    }

    /// Remove anchor `index`, joining its two segments.
    ///
    /// The joined segment keeps the outer handles.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError`] for a missing or locked anchor, or when
    /// only [`MIN_ANCHORS`] remain.
    pub fn remove_anchor(&mut self, index: usize) -> Result<(), CurveEditError> {
        if self.anchor(index)?.locked {
            return Err(CurveEditError::Locked(index));
        }
        if self.anchors.len() <= MIN_ANCHORS {
            return Err(CurveEditError::TooFewAnchors { min: MIN_ANCHORS });
        }

        let last = self.anchors.len() - 1;
        if index == 0 {
            self.controls.remove(0);
        } else if index == last {
            self.controls.pop();
        } else {
            let joined_end = self.controls.get(index).map(|pair| pair.end);
            if let (Some(end), Some(left)) = (joined_end, self.controls.get_mut(index - 1)) {
                left.end = end;
            }
            self.controls.remove(index);
        }
        self.anchors.remove(index);

        self.refresh();
        debug!(index, remaining = self.anchors.len(), "anchor removed");
        Ok(())
    }

    /// Lock or unlock anchor `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError::NoSuchAnchor`] if the index is out of range.
    pub fn set_locked(&mut self, index: usize, locked: bool) -> Result<(), CurveEditError> {
        self.anchor_mut(index)?.locked = locked;
        Ok(())
    }

    /// Switch anchor `index` between cartesian and polar handles.
    ///
    /// # Errors
    ///
    /// Returns [`CurveEditError::NoSuchAnchor`] if the index is out of range.
    pub fn set_polar(&mut self, index: usize, polar: bool) -> Result<(), CurveEditError> {
        self.anchor_mut(index)?.polar = polar;
        Ok(())
    }

    /// Restore the single-valued shape.
    ///
    /// Pushes anchors right until each is [`MIN_ANCHOR_GAP`] past its
    /// predecessor (the first anchor stays at x >= 0), then clamps every
    /// handle's x into its own segment, no further than
    /// `(1 - CURVE_MARGIN) * span` from its anchor. Returns whether
    /// anything moved.
    pub fn apply_constraints(&mut self) -> bool {
        let mut moved = false;
        let mut floor = 0.0;
        for anchor in &mut self.anchors {
            if anchor.x < floor {
                anchor.x = floor;
                moved = true;
            }
            floor = anchor.x + MIN_ANCHOR_GAP;
        }

        let spans = self.anchors.iter().zip(self.anchors.iter().skip(1));
        for (pair, (left, right)) in self.controls.iter_mut().zip(spans) {
            let (x0, x3) = (left.x, right.x);
            let reach = (1.0 - CURVE_MARGIN) * (x3 - x0);
            let start_x = pair.start.0.clamp(x0, x0 + reach);
            let end_x = pair.end.0.clamp(x3 - reach, x3);
            moved |= start_x != pair.start.0 || end_x != pair.end.0;
            pair.start.0 = start_x;
            pair.end.0 = end_x;
        }
        moved
    }

    /// Make every interior anchor's handles mirror images of each other.
    ///
    /// Each pair is replaced by the reflection of its average tangent
    /// about the anchor, shortened if needed to respect the margin on both
    /// sides. Locked anchors are smoothed too; locking only pins position.
    ///
    /// The result is C1: slope is continuous at each interior anchor, but
    /// the two handles keep equal length regardless of the neighbouring
    /// spans, so curvature generally jumps there.
    pub fn smooth(&mut self) {
        for index in 1..self.anchors.len().saturating_sub(1) {
            let (Some(prev), Some(anchor), Some(next)) = (
                self.anchors.get(index - 1),
                self.anchors.get(index),
                self.anchors.get(index + 1),
            ) else {
                continue;
            };
            let (Some(incoming), Some(outgoing)) = (
                self.controls.get(index - 1).map(|pair| pair.end),
                self.controls.get(index).map(|pair| pair.start),
            ) else {
                continue;
            };
            let pivot = anchor.point();
            let left_span = pivot.0 - prev.x;
            let right_span = next.x - pivot.0;

            let mut half = (
                0.5 * (outgoing.0 - incoming.0).max(0.0),
                0.5 * (outgoing.1 - incoming.1),
            );
            let limit = (1.0 - CURVE_MARGIN) * left_span.min(right_span);
            if half.0 > limit && half.0 > 0.0 {
                let scale = limit / half.0;
                half = (half.0 * scale, half.1 * scale);
            }

            if let Some(pair) = self.controls.get_mut(index - 1) {
                pair.end = (pivot.0 - half.0, pivot.1 - half.1);
            }
            if let Some(pair) = self.controls.get_mut(index) {
                pair.start = (pivot.0 + half.0, pivot.1 + half.1);
            }
        }
        self.refresh();
        debug!(anchors = self.anchors.len(), "curve smoothed");
    }

    /// Recompute the plot samples.
    pub fn update_plot(&mut self) {
        let mut plot = Vec::with_capacity(self.segment_count() * PLOT_FRAGMENTS + 1);
        for segment in self.segments() {
            for k in 0..PLOT_FRAGMENTS {
                plot.push(segment.evaluate(k as f64 / PLOT_FRAGMENTS as f64));
            }
        }
        if let Some(last) = self.anchors.last() {
            plot.push(last.point());
        }
        self.plot = plot;
    }

    fn refresh(&mut self) {
        self.apply_constraints();
        self.update_plot();
    }

    fn anchor(&self, index: usize) -> Result<&Anchor, CurveEditError> {
        let len = self.anchors.len();
        self.anchors
            .get(index)
            .ok_or(CurveEditError::NoSuchAnchor { index, len })
    }

    fn anchor_mut(&mut self, index: usize) -> Result<&mut Anchor, CurveEditError> {
        let len = self.anchors.len();
        self.anchors
            .get_mut(index)
            .ok_or(CurveEditError::NoSuchAnchor { index, len })
    }
}

fn check_finite(point: Point) -> Result<(), CurveEditError> {
    if point.0.is_finite() && point.1.is_finite() {
        Ok(())
    } else {
        Err(CurveEditError::NonFinite)
    }
}

#[inline]
fn offset(point: Point, by: Point) -> Point {
    (point.0 + by.0, point.1 + by.1)
}

/// Place `handle` opposite `dragged` about `pivot`, keeping its length.
fn mirror_direction(pivot: Point, dragged: Point, handle: Point) -> Point {
    let direction = (pivot.0 - dragged.0, pivot.1 - dragged.1);
    let norm = direction.0.hypot(direction.1);
    if norm == 0.0 {
        return handle;
    }
    let length = (handle.0 - pivot.0).hypot(handle.1 - pivot.1);
    (
        pivot.0 + direction.0 / norm * length,
        pivot.1 + direction.1 / norm * length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn assert_single_valued(curve: &CustomCurve) {
        for pair in curve.anchors().windows(2) {
            assert!(pair[1].x >= pair[0].x + MIN_ANCHOR_GAP - 1e-12);
        }
        for segment in curve.segments() {
            assert!(segment.is_x_monotone(), "{:?}", segment);
        }
    }

    #[test]
    fn test_default_curve() {
        let curve = CustomCurve::default();
        assert_eq!(curve.anchors().len(), 2);
        assert_eq!(curve.controls()[0], ControlPair::new((40.0, 1.0), (20.0, 2.0)));
        assert_eq!(curve.plot().len(), PLOT_FRAGMENTS + 1);
        assert_eq!(curve.plot().first(), Some(&(5.0, 1.0)));
        assert_eq!(curve.plot().last(), Some(&(50.0, 2.0)));
        assert_single_valued(&curve);
    }

    #[test]
    fn test_sample_holds_ends() {
        let curve = CustomCurve::default();
        assert_eq!(curve.sample(0.0), 1.0);
        assert_eq!(curve.sample(500.0), 2.0);
        let middle = curve.sample(27.5);
        assert!(middle > 1.0 && middle < 2.0);
    }

    #[test]
    fn test_add_anchor_keeps_shape() {
        let mut curve = CustomCurve::default();
        let before: Vec<f64> = (6..50).map(|x| curve.sample(f64::from(x))).collect();
        let on_curve = curve.sample(30.0);
        let index = must(curve.add_anchor(30.0, on_curve));
        assert_eq!(index, 1);
        assert_eq!(curve.segment_count(), 2);
        for (x, expected) in (6..50).zip(before) {
            assert_abs_diff_eq!(curve.sample(f64::from(x)), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_add_anchor_rejections() {
        let mut curve = CustomCurve::default();
        assert_eq!(curve.add_anchor(5.005, 1.0), Err(CurveEditError::DuplicateX(5.005)));
        assert!(matches!(
            curve.add_anchor(60.0, 1.0),
            Err(CurveEditError::OutsideDomain { min, max, .. }) if min == 5.0 && max == 50.0
        ));
        assert_eq!(curve.add_anchor(f64::NAN, 1.0), Err(CurveEditError::NonFinite));
        assert_eq!(curve, CustomCurve::default());
    }

    #[test]
    fn test_move_anchor_drags_handles() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]));
        let before = curve.controls().to_vec();
        must(curve.move_anchor(1, 11.0, 2.5));
        assert_eq!(curve.anchors()[1].point(), (11.0, 2.5));
        assert_abs_diff_eq!(curve.controls()[0].end.1, before[0].end.1 + 0.5);
        assert_abs_diff_eq!(curve.controls()[1].start.1, before[1].start.1 + 0.5);
        assert_single_valued(&curve);
    }

    #[test]
    fn test_move_anchor_clamps_between_neighbours() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]));
        must(curve.move_anchor(1, 35.0, 2.0));
        assert_abs_diff_eq!(curve.anchors()[1].x, 20.0 - MIN_ANCHOR_GAP);
        must(curve.move_anchor(0, -4.0, 1.0));
        assert_eq!(curve.anchors()[0].x, 0.0);
        assert_single_valued(&curve);
    }

    #[test]
    fn test_locked_anchor() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]));
        must(curve.set_locked(1, true));
        assert_eq!(curve.move_anchor(1, 12.0, 2.0), Err(CurveEditError::Locked(1)));
        assert_eq!(curve.remove_anchor(1), Err(CurveEditError::Locked(1)));
        must(curve.set_locked(1, false));
        must(curve.remove_anchor(1));
        assert_eq!(curve.anchors().len(), 2);
        assert_eq!(
            curve.set_locked(5, true),
            Err(CurveEditError::NoSuchAnchor { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_remove_keeps_minimum() {
        let mut curve = CustomCurve::default();
        assert_eq!(
            curve.remove_anchor(0),
            Err(CurveEditError::TooFewAnchors { min: MIN_ANCHORS })
        );
    }

    #[test]
    fn test_remove_joins_outer_handles() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]));
        let first_start = curve.controls()[0].start;
        let last_end = curve.controls()[1].end;
        must(curve.remove_anchor(1));
        assert_eq!(curve.controls(), &[ControlPair::new(first_start, last_end)]);
    }

    #[test]
    fn test_constraints_clamp_handles() {
        let mut curve = CustomCurve::default();
        must(curve.move_control(0, ControlSide::Start, (100.0, 1.0)));
        must(curve.move_control(0, ControlSide::End, (-3.0, 2.0)));
        let pair = curve.controls()[0];
        assert_abs_diff_eq!(pair.start.0, 41.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.end.0, 14.0, epsilon = 1e-9);
        assert_single_valued(&curve);
    }

    #[test]
    fn test_polar_anchor_keeps_tangent() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]));
        must(curve.set_polar(1, true));
        let length = {
            let h = curve.controls()[1].start;
            (h.0 - 10.0).hypot(h.1 - 2.0)
        };
        must(curve.move_control(0, ControlSide::End, (8.0, 2.0)));
        let opposite = curve.controls()[1].start;
        assert_abs_diff_eq!(opposite.1, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(opposite.0, 10.0 + length, epsilon = 1e-12);
    }

    #[test]
    fn test_smooth_reflects_handles() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (20.0, 4.0)]));
        curve.smooth();
        let pivot = curve.anchors()[1].point();
        let incoming = curve.controls()[0].end;
        let outgoing = curve.controls()[1].start;
        assert_abs_diff_eq!(pivot.0 - incoming.0, outgoing.0 - pivot.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pivot.1 - incoming.1, outgoing.1 - pivot.1, epsilon = 1e-12);
        assert_single_valued(&curve);
    }

    #[test]
    fn test_smooth_matches_slope_across_unequal_spans() {
        let mut curve = must(CustomCurve::through(&[(0.0, 1.0), (10.0, 2.0), (11.0, 4.0)]));
        curve.smooth();
        let pivot = curve.anchors()[1].point();
        let incoming = curve.controls()[0].end;
        let outgoing = curve.controls()[1].start;
        let slope_in = (pivot.1 - incoming.1) / (pivot.0 - incoming.0);
        let slope_out = (outgoing.1 - pivot.1) / (outgoing.0 - pivot.0);
        assert_abs_diff_eq!(slope_in, slope_out, epsilon = 1e-9);
        assert!(outgoing.0 - pivot.0 <= 1.0 - CURVE_MARGIN + 1e-12);
        assert_single_valued(&curve);
    }

    #[test]
    fn test_through_rejects_crowded_points() {
        assert_eq!(
            CustomCurve::through(&[(1.0, 1.0)]),
            Err(CurveEditError::TooFewAnchors { min: MIN_ANCHORS })
        );
        assert_eq!(
            CustomCurve::through(&[(1.0, 1.0), (1.001, 2.0)]),
            Err(CurveEditError::DuplicateX(1.001))
        );
    }
}
