//! Fixed-point arithmetic for the pointer acceleration engine.
//!
//! [`Fixed`] is a signed Q32.32 number backed by the `fixed` crate's
//! `I32F32`. One bit pattern is reserved as an overflow sentinel so that a
//! whole chain of operations can be checked once at the end:
//!
//! ```
//! use pointeraccel_fixed::Fixed;
//!
//! let speed = Fixed::hypot(Fixed::from_int(3), Fixed::from_int(4));
//! let rate = speed / Fixed::from_int(2);
//! assert_eq!(rate, Fixed::from_ratio(5, 2));
//!
//! let bad = (rate / Fixed::ZERO).ln();
//! assert!(bad.is_overflow());
//! ```
//!
//! # RT Safety
//!
//! Arithmetic, comparisons, `sqrt` and the transcendental functions are
//! integer-only with bounded iteration counts. Text parsing, formatting and
//! the `f64` conversions allocate or use the FPU and belong off the hot path.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod math;
pub mod text;
pub mod value;

pub use text::FixedParseError;
pub use value::{FRAC_BITS, Fixed};
