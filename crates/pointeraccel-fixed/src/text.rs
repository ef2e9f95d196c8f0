//! Decimal text and serde support for [`Fixed`].

use core::fmt;
use core::str::FromStr;

use fixed::types::I32F32;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{FRAC_BITS, Fixed};

const MAX_PLACES: usize = 18;

/// Failure to parse a decimal literal into a [`Fixed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixedParseError {
    /// The text was empty after trimming.
    #[error("empty fixed-point literal")]
    Empty,
    /// The text is not a decimal number.
    #[error("invalid fixed-point literal '{0}'")]
    Invalid(String),
    /// The number does not fit in Q32.32.
    #[error("fixed-point literal '{0}' is out of range")]
    OutOfRange(String),
}

impl FromStr for Fixed {
    type Err = FixedParseError;

    /// Parse a decimal literal such as `-1.25`, `3` or `0.0555555`.
    ///
    /// Rounding is to the nearest Q32.32 value. Text that names the
    /// sentinel pattern is rejected as out of range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(FixedParseError::Empty);
        }
        match I32F32::from_str(text) {
            Ok(inner) => {
                let value = Fixed::from_inner(inner);
                if value.is_overflow() {
                    Err(FixedParseError::OutOfRange(text.to_owned()))
                } else {
                    Ok(value)
                }
            }
            // Plain decimals that still fail can only be out of range.
            Err(_) if text.parse::<f64>().is_ok_and(f64::is_finite) && !text.contains(['e', 'E']) => {
                Err(FixedParseError::OutOfRange(text.to_owned()))
            }
            Err(_) => Err(FixedParseError::Invalid(text.to_owned())),
        }
    }
}

impl fmt::Display for Fixed {
    /// Exact decimal expansion, honouring `{:.N}` precision. The sentinel
    /// prints as `overflow`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overflow() {
            return f.write_str("overflow");
        }
        match f.precision() {
            Some(places) => f.write_str(&self.format_decimal(places)),
            None => fmt::Display::fmt(&self.inner(), f),
        }
    }
}

impl Fixed {
    /// Render with exactly `places` decimal digits (at most 18), rounding
    /// half away from zero.
    #[must_use]
    pub fn format_decimal(self, places: usize) -> String {
        if self.is_overflow() {
            return "overflow".to_owned();
        }
        let places = places.min(MAX_PLACES);
        let scale = 10_i128.pow(u32::try_from(places).unwrap_or(0));
        let bits = i128::from(self.to_bits());
        let half = 1_i128 << (FRAC_BITS - 1);
        let scaled = (bits.abs() * scale + half) >> FRAC_BITS;
        let sign = if bits < 0 && scaled != 0 { "-" } else { "" };
        let whole = scaled / scale;
        if places == 0 {
            return format!("{sign}{whole}");
        }
        let frac = scaled % scale;
        format!("{sign}{whole}.{frac:0places$}")
    }
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct FixedVisitor;

impl Visitor<'_> for FixedVisitor {
    type Value = Fixed;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal fixed-point number or string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Fixed, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fixed, E> {
        i32::try_from(v)
            .map(Fixed::from_int)
            .map_err(|_| E::custom(FixedParseError::OutOfRange(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fixed, E> {
        i32::try_from(v)
            .map(Fixed::from_int)
            .map_err(|_| E::custom(FixedParseError::OutOfRange(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Fixed, E> {
        let value = Fixed::from_f64(v);
        if value.is_overflow() {
            Err(E::custom(FixedParseError::OutOfRange(v.to_string())))
        } else {
            Ok(value)
        }
    }
}

impl<'de> Deserialize<'de> for Fixed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FixedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(must("3".parse::<Fixed>()), Fixed::from_int(3));
        assert_eq!(must("-1.25".parse::<Fixed>()), Fixed::from_ratio(-5, 4));
        assert_eq!(must("  0.5 ".parse::<Fixed>()), Fixed::HALF);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Fixed>(), Err(FixedParseError::Empty));
        assert!(matches!("abc".parse::<Fixed>(), Err(FixedParseError::Invalid(_))));
        assert!(matches!("1.2.3".parse::<Fixed>(), Err(FixedParseError::Invalid(_))));
        assert!(matches!(
            "99999999999".parse::<Fixed>(),
            Err(FixedParseError::OutOfRange(_))
        ));
        assert!(matches!(
            "-2147483648".parse::<Fixed>(),
            Err(FixedParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for text in ["0", "1.5", "-3.25", "1000"] {
            let v = must(text.parse::<Fixed>());
            assert_eq!(v.to_string(), text);
            assert_eq!(must(v.to_string().parse::<Fixed>()), v);
        }
        assert_eq!(Fixed::OVERFLOW.to_string(), "overflow");
    }

    #[test]
    fn format_decimal_rounds() {
        assert_eq!(Fixed::from_ratio(1, 3).format_decimal(3), "0.333");
        assert_eq!(Fixed::from_ratio(2, 3).format_decimal(3), "0.667");
        assert_eq!(Fixed::from_int(5).format_decimal(3), "5.000");
        assert_eq!(Fixed::from_ratio(-1, 8).format_decimal(2), "-0.13");
        assert_eq!(Fixed::from_ratio(-1, 1000).format_decimal(1), "0.0");
        assert_eq!(format!("{:.1}", Fixed::from_ratio(7, 4)), "1.8");
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let v = Fixed::from_ratio(3, 2);
        let json = must(serde_json::to_string(&v));
        assert_eq!(json, "\"1.5\"");
        let back: Fixed = must(serde_json::from_str(&json));
        assert_eq!(back, v);
        let from_number: Fixed = must(serde_json::from_str("2"));
        assert_eq!(from_number, Fixed::TWO);
    }
}
