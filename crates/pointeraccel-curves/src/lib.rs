//! Acceleration curves for the pointer acceleration engine.
//!
//! # Overview
//!
//! Nine curve shapes map input speed (counts per millisecond) to a
//! sensitivity factor:
//! - **linear**, **power**, **classic**, **natural**: grow above a knee
//! - **motivity**, **synchronous**: log-space sigmoids bounded by `motivity`
//! - **jump**: a step, optionally a logistic ramp
//! - **lut**, **custom curve**: piecewise-linear over a [`LutTable`]
//!
//! [`ModeConstants`] caches everything derivable from [`CurveParams`] so
//! that per-sample evaluation is a single dispatch plus a handful of
//! fixed-point operations.
//!
//! # RT Safety
//!
//! `ModeConstants::evaluate` and `LutTable::interpolate` are allocation-free
//! with bounded work. Building constants and parsing tables are not meant
//! for the sample path.
//!
//! # Example
//!
//! ```
//! use pointeraccel_curves::prelude::*;
//! use pointeraccel_fixed::Fixed;
//!
//! let params = CurveParams {
//!     mode: AccelMode::Linear.into(),
//!     acceleration: Fixed::from_ratio(1, 4),
//!     ..CurveParams::default()
//! };
//! let constants = ModeConstants::build(&params);
//! assert_eq!(constants.evaluate(Fixed::from_int(8), &params), Fixed::from_int(3));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod constants;
pub mod formulas;
pub mod lut;
pub mod mode;
pub mod params;
pub mod prelude;

pub use constants::{ModeConstants, evaluate};
pub use lut::{LUT_CAPACITY, LutTable};
pub use mode::{AccelMode, ModeParseError, ModeSelector};
pub use params::CurveParams;
