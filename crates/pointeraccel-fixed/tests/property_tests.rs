//! Property-based tests for fixed-point arithmetic.

use pointeraccel_fixed::Fixed;
use quickcheck_macros::quickcheck;

fn small(v: i32) -> Fixed {
    Fixed::from_int(v % 40_000)
}

#[quickcheck]
fn prop_integer_round_trip(v: i32) -> bool {
    if v == i32::MIN {
        return Fixed::from_int(v).is_overflow();
    }
    Fixed::from_int(v).to_int() == v
}

#[quickcheck]
fn prop_add_sub_inverse(a: i32, b: i32) -> bool {
    let (a, b) = (small(a), small(b));
    (a + b) - b == a
}

#[quickcheck]
fn prop_mul_by_one_is_identity(bits: i64) -> bool {
    let v = Fixed::from_bits(bits);
    v.is_overflow() || v * Fixed::ONE == v
}

#[quickcheck]
fn prop_sentinel_propagates(bits: i64) -> bool {
    let v = Fixed::from_bits(bits);
    let o = Fixed::OVERFLOW;
    (v + o).is_overflow() && (o * v).is_overflow() && (v / o).is_overflow() && (o - v).is_overflow()
}

#[quickcheck]
fn prop_truncation_plus_fraction_is_exact(bits: i64) -> bool {
    let v = Fixed::from_bits(bits);
    if v.is_overflow() {
        return true;
    }
    Fixed::from_int(v.to_int()) + v.fract_toward_zero() == v
}

#[quickcheck]
fn prop_fraction_is_below_one_and_shares_sign(bits: i64) -> bool {
    let v = Fixed::from_bits(bits);
    if v.is_overflow() {
        return true;
    }
    let f = v.fract_toward_zero();
    f.abs() < Fixed::ONE && (f.is_zero() || f.is_negative() == v.is_negative())
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sqrt_squared_is_close(v in 0.0f64..1.0e9) {
            let x = Fixed::from_f64(v);
            let r = x.sqrt();
            prop_assert!(!r.is_overflow());
            let back = (r * r).to_f64();
            prop_assert!((back - x.to_f64()).abs() <= 1e-4 * x.to_f64().max(1.0));
        }

        #[test]
        fn exp_inverts_ln(v in 0.001f64..100_000.0) {
            let x = Fixed::from_f64(v);
            let back = x.ln().exp().to_f64();
            prop_assert!((back - x.to_f64()).abs() <= 1e-6 * x.to_f64().max(1.0));
        }

        #[test]
        fn sin_cos_identity(v in -50.0f64..50.0) {
            let x = Fixed::from_f64(v);
            let s = x.sin();
            let c = x.cos();
            let one = (s * s + c * c).to_f64();
            prop_assert!((one - 1.0).abs() < 1e-7);
        }

        #[test]
        fn division_agrees_with_float(a in -1.0e6f64..1.0e6, b in 0.01f64..1.0e3) {
            let q = Fixed::from_f64(a) / Fixed::from_f64(b);
            let expected = Fixed::from_f64(a).to_f64() / Fixed::from_f64(b).to_f64();
            prop_assert!((q.to_f64() - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }

        #[test]
        fn text_round_trip(bits in (i64::MIN + 1)..i64::MAX) {
            let v = Fixed::from_bits(bits);
            let parsed: Fixed = match v.to_string().parse() {
                Ok(p) => p,
                Err(e) => return Err(TestCaseError::fail(format!("{e}"))),
            };
            prop_assert_eq!(parsed, v);
        }
    }
}
