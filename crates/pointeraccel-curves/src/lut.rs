//! Fixed-capacity lookup table for the table-driven modes.

use core::fmt;
use core::str::FromStr;

use pointeraccel_errors::LutError;
use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};

/// Maximum number of entries in a [`LutTable`].
pub const LUT_CAPACITY: usize = 256;

/// Piecewise-linear lookup table with at most [`LUT_CAPACITY`] points.
///
/// X values are strictly increasing; this is checked on construction, so
/// every `LutTable` value is valid. The table is `Copy` and lives inline,
/// which lets a fully built table be moved into the committed parameters
/// in one assignment: the evaluator never sees a half-written table.
///
/// # RT Safety
///
/// [`LutTable::interpolate`] is a binary search plus one interpolation:
/// O(log n), no allocation.
///
/// # Example
///
/// ```
/// use pointeraccel_curves::LutTable;
/// use pointeraccel_fixed::Fixed;
///
/// let table: LutTable = "0,1;10,2".parse()?;
/// assert_eq!(table.interpolate(Fixed::from_int(5)), Fixed::from_ratio(3, 2));
/// assert_eq!(table.interpolate(Fixed::from_int(50)), Fixed::TWO);
/// # Ok::<(), pointeraccel_errors::LutError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Fixed, Fixed)>", into = "Vec<(Fixed, Fixed)>")]
pub struct LutTable {
    xs: [Fixed; LUT_CAPACITY],
    ys: [Fixed; LUT_CAPACITY],
    len: usize,
}

impl Default for LutTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl LutTable {
    /// A table with no points. Interpolating it yields one.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            xs: [Fixed::ZERO; LUT_CAPACITY],
            ys: [Fixed::ZERO; LUT_CAPACITY],
            len: 0,
        }
    }

    /// Build a table from `(x, y)` points.
    ///
    /// # Errors
    ///
    /// Returns [`LutError`] if there are more than [`LUT_CAPACITY`] points,
    /// a coordinate is the overflow sentinel, or x does not strictly
    /// increase.
    pub fn new(points: &[(Fixed, Fixed)]) -> Result<Self, LutError> {
        if points.len() > LUT_CAPACITY {
            return Err(LutError::TooManyPoints {
                len: points.len(),
                capacity: LUT_CAPACITY,
            });
        }
        let mut table = Self::empty();
        let mut previous: Option<Fixed> = None;
        for (index, ((x, y), (slot_x, slot_y))) in points
            .iter()
            .zip(table.xs.iter_mut().zip(table.ys.iter_mut()))
            .enumerate()
        {
            if x.is_overflow() || y.is_overflow() {
                return Err(LutError::NonFinite { index });
            }
            if previous.is_some_and(|p| *x <= p) {
                return Err(LutError::NotIncreasing { index });
            }
            previous = Some(*x);
            *slot_x = *x;
            *slot_y = *y;
        }
        table.len = points.len();
        Ok(table)
    }

    /// Build a table from floating-point points (offline tooling).
    ///
    /// # Errors
    ///
    /// As [`LutTable::new`]; non-finite or out-of-range coordinates are
    /// reported as [`LutError::NonFinite`].
    pub fn from_f64_points(points: &[(f64, f64)]) -> Result<Self, LutError> {
        let converted: Vec<(Fixed, Fixed)> = points
            .iter()
            .map(|&(x, y)| (Fixed::from_f64(x), Fixed::from_f64(y)))
            .collect();
        Self::new(&converted)
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The x values in use.
    #[must_use]
    pub fn xs(&self) -> &[Fixed] {
        self.xs.get(..self.len).unwrap_or(&[])
    }

    /// The y values in use.
    #[must_use]
    pub fn ys(&self) -> &[Fixed] {
        self.ys.get(..self.len).unwrap_or(&[])
    }

    /// Iterate over `(x, y)` points in order.
    pub fn points(&self) -> impl Iterator<Item = (Fixed, Fixed)> + '_ {
        self.xs().iter().copied().zip(self.ys().iter().copied())
    }

    /// Piecewise-linear interpolation, clamped to the end points.
    ///
    /// An empty table yields one (no acceleration).
    #[inline]
    #[must_use]
    pub fn interpolate(&self, x: Fixed) -> Fixed {
        let xs = self.xs();
        let ys = self.ys();
        let (Some(&first_x), Some(&last_x)) = (xs.first(), xs.last()) else {
            return Fixed::ONE;
        };
        if x <= first_x {
            return ys.first().copied().unwrap_or(Fixed::ONE);
        }
        if x >= last_x {
            return ys.last().copied().unwrap_or(Fixed::ONE);
        }

        // first_x < x < last_x, so 1 <= upper <= len - 1.
        let upper = xs.partition_point(|&v| v <= x);
        let lower = upper.saturating_sub(1);
        match (xs.get(lower), xs.get(upper), ys.get(lower), ys.get(upper)) {
            (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) => {
                let t = (x - x0) / (x1 - x0);
                y0 + (y1 - y0) * t
            }
            _ => Fixed::ONE,
        }
    }

    /// Render as `x,y;x,y;...`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.points()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl FromStr for LutTable {
    type Err = LutError;

    /// Parse `x,y;x,y;...`. Whitespace around entries is ignored and an
    /// empty string is an empty table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut points = Vec::new();
        for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (x, y) = entry
                .split_once(',')
                .ok_or_else(|| LutError::MalformedPoint(entry.to_owned()))?;
            let x: Fixed = x
                .parse()
                .map_err(|_| LutError::MalformedPoint(entry.to_owned()))?;
            let y: Fixed = y
                .parse()
                .map_err(|_| LutError::MalformedPoint(entry.to_owned()))?;
            points.push((x, y));
        }
        Self::new(&points)
    }
}

impl TryFrom<Vec<(Fixed, Fixed)>> for LutTable {
    type Error = LutError;

    fn try_from(points: Vec<(Fixed, Fixed)>) -> Result<Self, Self::Error> {
        Self::new(&points)
    }
}

impl From<LutTable> for Vec<(Fixed, Fixed)> {
    fn from(table: LutTable) -> Self {
        table.points().collect()
    }
}

impl fmt::Debug for LutTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LutTable")
            .field("len", &self.len)
            .field("points", &self.to_text())
            .finish()
    }
}
