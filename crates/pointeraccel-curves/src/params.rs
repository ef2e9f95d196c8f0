//! Curve-shaping parameters consumed by the mode constant cache.

use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};

use crate::lut::LutTable;
use crate::mode::ModeSelector;

/// The subset of the committed parameters that shapes the acceleration
/// factor.
///
/// Each mode reads only the fields it needs. The others are kept as-is
/// across mode switches.
///
/// | Mode | acceleration | exponent | midpoint | motivity |
/// |---|---|---|---|---|
/// | linear | slope (divided by sensitivity) | | knee | |
/// | power | scale | exponent | knee | asymptotic cap (when > 1) |
/// | classic | scale | exponent (> 1) | knee | |
/// | motivity | growth rate | | centre speed | maximum factor |
/// | synchronous | sync speed | gamma | smoothness | maximum factor |
/// | jump | step height | smooth steepness | step speed | |
/// | natural | scale | | knee | |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Selected mode.
    pub mode: ModeSelector,
    /// Acceleration strength.
    pub acceleration: Fixed,
    /// Exponent (power/classic), gamma (synchronous) or steepness (jump).
    pub exponent: Fixed,
    /// Knee, centre or step position; smoothness for synchronous.
    pub midpoint: Fixed,
    /// Upper bound on the factor.
    pub motivity: Fixed,
    /// Integrate the curve as a gain curve so the output speed stays smooth
    /// at the knee.
    pub smoothing: bool,
    /// Base sensitivity, used to normalize the linear slope.
    pub sensitivity: Fixed,
    /// Lookup table for the table-driven modes.
    pub lut: LutTable,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            mode: ModeSelector::default(),
            acceleration: Fixed::ZERO,
            exponent: Fixed::ZERO,
            midpoint: Fixed::ZERO,
            motivity: Fixed::ZERO,
            smoothing: false,
            sensitivity: Fixed::ONE,
            lut: LutTable::empty(),
        }
    }
}
