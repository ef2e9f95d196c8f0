//! Prelude module for convenient imports.

pub use crate::{
    constants::{ModeConstants, evaluate},
    lut::{LUT_CAPACITY, LutTable},
    mode::{AccelMode, ModeParseError, ModeSelector},
    params::CurveParams,
};
