//! Prelude module for convenient imports.

pub use crate::{
    bezier::{CubicSegment, Point},
    curve::{Anchor, ControlPair, ControlSide, CustomCurve},
    export::MIN_TABLE_SIZE,
};
pub use pointeraccel_errors::{CurveEditError, CurveImportError};
