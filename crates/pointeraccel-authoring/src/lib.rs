//! Curve authoring and lookup table export.
//!
//! # Overview
//!
//! A [`CustomCurve`] is a chain of cubic Bezier segments through ordered
//! [`Anchor`]s. Edits keep it a single-valued function of input speed:
//! anchors stay strictly increasing in x and every handle stays inside
//! its own segment with a [`CURVE_MARGIN`] band to the far anchor.
//!
//! The runtime never evaluates the Bezier form. It consumes a
//! [`LutTable`](pointeraccel_curves::LutTable) produced by
//! [`CustomCurve::export_lut`], whose abscissas cluster where the curve
//! bends.
//!
//! # Example
//!
//! ```
//! use pointeraccel_authoring::prelude::*;
//!
//! let mut curve = CustomCurve::default();
//! curve.add_anchor(15.0, 1.6)?;
//! curve.smooth();
//!
//! let text = curve.export_text();
//! let mut restored = CustomCurve::default();
//! restored.import_text(&text)?;
//! assert_eq!(restored.anchors().len(), 3);
//!
//! let table = curve.export_lut(64)?;
//! assert_eq!(table.len(), 64);
//! # Ok::<(), pointeraccel_errors::AccelError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bezier;
pub mod curve;
pub mod export;
pub mod prelude;
pub mod text;

pub use bezier::{CubicSegment, Point};
pub use curve::{
    Anchor, CURVE_MARGIN, ControlPair, ControlSide, CustomCurve, MIN_ANCHOR_GAP, MIN_ANCHORS,
    PLOT_FRAGMENTS,
};
pub use export::{MIN_TABLE_SIZE, UNIFORM_SHARE};
pub use text::EXPORT_PRECISION;
