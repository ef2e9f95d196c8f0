//! The [`Fixed`] value type and its checked arithmetic.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use fixed::types::I32F32;

/// Number of fractional bits in a [`Fixed`] value.
pub const FRAC_BITS: u32 = 32;

const ONE_BITS: i64 = 1 << FRAC_BITS;
const SENTINEL_BITS: i64 = i64::MIN;

/// Signed Q32.32 fixed-point number with a reserved overflow sentinel.
///
/// The bit pattern `i64::MIN` never denotes an ordinary value. Every
/// operation that leaves the representable range, divides by zero or
/// receives an out-of-domain argument yields [`Fixed::OVERFLOW`], and any
/// operation with an overflowed operand stays overflowed. Callers check
/// [`Fixed::is_overflow`] once at the end of a computation instead of after
/// every step.
///
/// # RT Safety
///
/// All arithmetic on `Fixed` is integer-only, allocation-free and bounded.
/// The `f64` conversions exist for offline tooling and tests.
///
/// # Example
///
/// ```
/// use pointeraccel_fixed::Fixed;
///
/// let a: Fixed = "1.5".parse()?;
/// let b = Fixed::from_int(2);
/// assert_eq!((a * b).to_int(), 3);
///
/// let broken = Fixed::ONE / Fixed::ZERO;
/// assert!(broken.is_overflow());
/// assert!((broken + Fixed::ONE).is_overflow());
/// # Ok::<(), pointeraccel_fixed::FixedParseError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fixed(I32F32);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self::from_bits(0);
    /// One.
    pub const ONE: Self = Self::from_bits(ONE_BITS);
    /// Two.
    pub const TWO: Self = Self::from_bits(2 * ONE_BITS);
    /// One half.
    pub const HALF: Self = Self::from_bits(ONE_BITS / 2);
    /// Largest ordinary value.
    pub const MAX: Self = Self::from_bits(i64::MAX);
    /// Smallest ordinary value (one ULP above the sentinel).
    pub const MIN: Self = Self::from_bits(i64::MIN + 1);
    /// Smallest positive value.
    pub const EPSILON: Self = Self::from_bits(1);
    /// The overflow / invalid sentinel.
    pub const OVERFLOW: Self = Self::from_bits(SENTINEL_BITS);

    /// π rounded to the nearest Q32.32 value.
    pub const PI: Self = Self::from_bits(13_493_037_705);
    /// π / 2.
    pub const FRAC_PI_2: Self = Self::from_bits(6_746_518_852);
    /// 2π.
    pub const TAU: Self = Self::from_bits(26_986_075_409);
    /// ln 2.
    pub const LN_2: Self = Self::from_bits(2_977_044_472);

    /// Build from the raw Q32.32 bit pattern.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: i64) -> Self {
        Self(I32F32::from_bits(bits))
    }

    /// Raw Q32.32 bit pattern.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> i64 {
        self.0.to_bits()
    }

    /// Whether this value is the overflow sentinel.
    #[inline]
    #[must_use]
    pub const fn is_overflow(self) -> bool {
        self.to_bits() == SENTINEL_BITS
    }

    /// Exact conversion from an integer.
    ///
    /// `i32::MIN` maps onto the sentinel pattern and therefore reports
    /// overflow.
    #[inline]
    #[must_use]
    pub const fn from_int(value: i32) -> Self {
        Self::from_bits((value as i64) << FRAC_BITS)
    }

    /// Build `num / den` without going through floating point.
    #[must_use]
    pub fn from_ratio(num: i32, den: i32) -> Self {
        Self::from_int(num) / Self::from_int(den)
    }

    /// Truncate toward zero.
    ///
    /// The sentinel truncates to `i32::MIN`; check [`Fixed::is_overflow`]
    /// first when that matters.
    #[inline]
    #[must_use]
    pub fn to_int(self) -> i32 {
        i32::try_from(self.to_bits() / ONE_BITS).unwrap_or(i32::MIN)
    }

    /// Round toward negative infinity.
    #[inline]
    #[must_use]
    pub fn floor(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        Self::from_bits(self.to_bits() & !(ONE_BITS - 1))
    }

    /// Fractional part left over after [`Fixed::to_int`].
    ///
    /// `self == Fixed::from_int(self.to_int()) + self.fract_toward_zero()`
    /// holds for every ordinary value.
    #[inline]
    #[must_use]
    pub fn fract_toward_zero(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        Self::from_bits(self.to_bits() % ONE_BITS)
    }

    /// Lossy conversion for tooling and tests. The sentinel maps to NaN.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        if self.is_overflow() {
            return f64::NAN;
        }
        self.0.to_num::<f64>()
    }

    /// Nearest representable value, or the sentinel when `value` is not
    /// finite or out of range.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        I32F32::checked_from_num(value).map_or(Self::OVERFLOW, Self::from_inner)
    }

    #[inline]
    pub(crate) fn from_inner(inner: I32F32) -> Self {
        Self::from_bits(inner.to_bits())
    }

    #[inline]
    pub(crate) fn inner(self) -> I32F32 {
        self.0
    }

    /// Map an `i128` bit pattern back into range.
    #[inline]
    pub(crate) fn from_wide(bits: i128) -> Self {
        match i64::try_from(bits) {
            Ok(b) if b != SENTINEL_BITS => Self::from_bits(b),
            _ => Self::OVERFLOW,
        }
    }

    #[inline]
    fn either_overflow(self, rhs: Self) -> bool {
        self.is_overflow() || rhs.is_overflow()
    }

    /// Multiply by an integer.
    #[inline]
    #[must_use]
    pub fn mul_int(self, rhs: i32) -> Self {
        if self.is_overflow() {
            return Self::OVERFLOW;
        }
        Self::from_wide(i128::from(self.to_bits()) * i128::from(rhs))
    }

    /// Divide by an integer, truncating toward zero.
    #[inline]
    #[must_use]
    pub fn div_int(self, rhs: i32) -> Self {
        if self.is_overflow() || rhs == 0 {
            return Self::OVERFLOW;
        }
        Self::from_wide(i128::from(self.to_bits()) / i128::from(rhs))
    }

    /// Absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        Self::from_bits(self.to_bits().abs())
    }

    /// `-1`, `0` or `1`. The sentinel stays the sentinel.
    #[inline]
    #[must_use]
    pub fn signum(self) -> Self {
        if self.is_overflow() {
            return self;
        }
        Self::from_int(self.to_bits().signum() as i32)
    }

    /// Strictly greater than zero.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.to_bits() > 0
    }

    /// Strictly less than zero (the sentinel is not negative).
    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.to_bits() < 0 && !self.is_overflow()
    }

    /// Exactly zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.to_bits() == 0
    }

    /// Smaller of two values; the sentinel wins.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self.either_overflow(other) {
            return Self::OVERFLOW;
        }
        if other.to_bits() < self.to_bits() { other } else { self }
    }

    /// Larger of two values; the sentinel wins.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.either_overflow(other) {
            return Self::OVERFLOW;
        }
        if other.to_bits() > self.to_bits() { other } else { self }
    }

    /// Clamp into `[lo, hi]`.
    #[inline]
    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// `1 / self`.
    #[inline]
    #[must_use]
    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    /// Square.
    #[inline]
    #[must_use]
    pub fn square(self) -> Self {
        self * self
    }

    /// Square root, rounded down. Negative input yields the sentinel.
    ///
    /// # RT Safety
    ///
    /// Uses the integer square root of a widened operand; constant work.
    #[must_use]
    pub fn sqrt(self) -> Self {
        if self.is_overflow() || self.is_negative() {
            return Self::OVERFLOW;
        }
        let widened = u128::from(self.to_bits().unsigned_abs()) << FRAC_BITS;
        Self::from_wide(i128::try_from(widened.isqrt()).unwrap_or(i128::MAX))
    }

    /// `sqrt(x² + y²)` without intermediate overflow for any ordinary pair.
    #[must_use]
    pub fn hypot(x: Self, y: Self) -> Self {
        if x.either_overflow(y) {
            return Self::OVERFLOW;
        }
        let xb = i128::from(x.to_bits());
        let yb = i128::from(y.to_bits());
        // Both squares fit in u128 since each operand is below 2^63.
        let sum = (xb * xb).unsigned_abs() + (yb * yb).unsigned_abs();
        Self::from_wide(i128::try_from(sum.isqrt()).unwrap_or(i128::MAX))
    }
}

impl PartialOrd for Fixed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order on the bit pattern; the sentinel sorts below every value.
impl Ord for Fixed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bits().cmp(&other.to_bits())
    }
}

/// Checked addition; overflow yields the sentinel.
impl Add for Fixed {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        if self.either_overflow(rhs) {
            return Self::OVERFLOW;
        }
        Self::from_wide(i128::from(self.to_bits()) + i128::from(rhs.to_bits()))
    }
}

/// Checked subtraction; overflow yields the sentinel.
impl Sub for Fixed {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if self.either_overflow(rhs) {
            return Self::OVERFLOW;
        }
        Self::from_wide(i128::from(self.to_bits()) - i128::from(rhs.to_bits()))
    }
}

/// Checked multiplication, rounding toward negative infinity.
impl Mul for Fixed {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        if self.either_overflow(rhs) {
            return Self::OVERFLOW;
        }
        Self::from_wide((i128::from(self.to_bits()) * i128::from(rhs.to_bits())) >> FRAC_BITS)
    }
}

/// Checked division, truncating toward zero. Division by zero yields the
/// sentinel.
impl Div for Fixed {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        if self.either_overflow(rhs) || rhs.to_bits() == 0 {
            return Self::OVERFLOW;
        }
        Self::from_wide((i128::from(self.to_bits()) << FRAC_BITS) / i128::from(rhs.to_bits()))
    }
}

impl Neg for Fixed {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl From<i32> for Fixed {
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overflow() {
            write!(f, "Fixed(OVERFLOW)")
        } else {
            write!(f, "Fixed({})", self.0)
        }
    }
}
