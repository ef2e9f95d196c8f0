//! Mode constant cache.
//!
//! [`ModeConstants`] is rebuilt once per committed parameter change by a
//! single exhaustive match over the modes. The per-sample path only
//! dispatches on the already-built variant.

use pointeraccel_errors::EngineFault;
use pointeraccel_fixed::Fixed;

use crate::formulas::{Classic, Jump, Linear, Motivity, Natural, Power, Synchronous};
use crate::mode::AccelMode;
use crate::params::CurveParams;

/// Derived constants for the active mode.
///
/// # RT Safety
///
/// [`ModeConstants::evaluate`] is O(1) fixed-point arithmetic for the
/// formula modes and O(log n) for the table modes. [`ModeConstants::build`]
/// is not meant for the sample path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConstants {
    /// Linear mode constants
    Linear(Linear),
    /// Power mode constants
    Power(Power),
    /// Classic mode constants
    Classic(Classic),
    /// Motivity mode constants
    Motivity(Motivity),
    /// Synchronous mode constants
    Synchronous(Synchronous),
    /// Jump mode constants
    Jump(Jump),
    /// Lookup table; evaluates the committed table directly
    Lut,
    /// Exported custom curve; same evaluation as [`ModeConstants::Lut`]
    CustomCurve,
    /// Natural mode constants
    Natural(Natural),
    /// No usable mode; the factor is always one
    PassThrough(EngineFault),
}

impl Default for ModeConstants {
    fn default() -> Self {
        Self::build(&CurveParams::default())
    }
}

impl ModeConstants {
    /// Derive the constants for `params.mode`.
    ///
    /// An unknown mode selector yields
    /// `PassThrough(EngineFault::NoValidMode)`; a known mode whose
    /// parameters are unusable yields
    /// `PassThrough(EngineFault::InvalidModeParameters)`.
    #[must_use]
    pub fn build(params: &CurveParams) -> Self {
        let Some(mode) = params.mode.mode() else {
            return Self::PassThrough(EngineFault::NoValidMode);
        };
        let built = match mode {
            AccelMode::Linear => Linear::new(params).map(Self::Linear),
            AccelMode::Power => Power::new(params).map(Self::Power),
            AccelMode::Classic => Classic::new(params).map(Self::Classic),
            AccelMode::Motivity => Motivity::new(params).map(Self::Motivity),
            AccelMode::Synchronous => Synchronous::new(params).map(Self::Synchronous),
            AccelMode::Jump => Jump::new(params).map(Self::Jump),
            AccelMode::Lut => Some(Self::Lut),
            AccelMode::CustomCurve => Some(Self::CustomCurve),
            AccelMode::Natural => Natural::new(params).map(Self::Natural),
        };
        built.unwrap_or(Self::PassThrough(EngineFault::InvalidModeParameters))
    }

    /// Sensitivity factor for input speed `x`.
    ///
    /// Non-positive speeds always give one. The result may be the overflow
    /// sentinel; callers check it.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, x: Fixed, params: &CurveParams) -> Fixed {
        if !x.is_positive() {
            return Fixed::ONE;
        }
        match self {
            Self::Linear(c) => c.evaluate(x),
            Self::Power(c) => c.evaluate(x),
            Self::Classic(c) => c.evaluate(x),
            Self::Motivity(c) => c.evaluate(x),
            Self::Synchronous(c) => c.evaluate(x),
            Self::Jump(c) => c.evaluate(x),
            Self::Lut | Self::CustomCurve => params.lut.interpolate(x),
            Self::Natural(c) => c.evaluate(x),
            Self::PassThrough(_) => Fixed::ONE,
        }
    }

    /// The fault recorded for a pass-through cache, if any.
    #[inline]
    #[must_use]
    pub fn fault(&self) -> Option<EngineFault> {
        match self {
            Self::PassThrough(fault) => Some(*fault),
            _ => None,
        }
    }

    /// The mode these constants evaluate, if any.
    #[must_use]
    pub fn mode(&self) -> Option<AccelMode> {
        match self {
            Self::Linear(_) => Some(AccelMode::Linear),
            Self::Power(_) => Some(AccelMode::Power),
            Self::Classic(_) => Some(AccelMode::Classic),
            Self::Motivity(_) => Some(AccelMode::Motivity),
            Self::Synchronous(_) => Some(AccelMode::Synchronous),
            Self::Jump(_) => Some(AccelMode::Jump),
            Self::Lut => Some(AccelMode::Lut),
            Self::CustomCurve => Some(AccelMode::CustomCurve),
            Self::Natural(_) => Some(AccelMode::Natural),
            Self::PassThrough(_) => None,
        }
    }
}

/// Evaluate the factor for `input` with freshly derived constants.
///
/// Convenience for offline tooling; the engine keeps a cached
/// [`ModeConstants`] instead.
#[must_use]
pub fn evaluate(input: Fixed, params: &CurveParams) -> Fixed {
    ModeConstants::build(params).evaluate(input, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::LutTable;
    use crate::mode::ModeSelector;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_unknown_mode_is_pass_through() {
        let params = CurveParams {
            mode: ModeSelector::Unknown(99),
            acceleration: Fixed::from_int(5),
            ..CurveParams::default()
        };
        let constants = ModeConstants::build(&params);
        assert_eq!(constants.fault(), Some(EngineFault::NoValidMode));
        assert_eq!(constants.evaluate(Fixed::from_int(1000), &params), Fixed::ONE);
    }

    #[test]
    fn test_invalid_parameters_are_pass_through() {
        let params = CurveParams {
            mode: AccelMode::Classic.into(),
            acceleration: Fixed::ONE,
            exponent: Fixed::HALF,
            ..CurveParams::default()
        };
        let constants = ModeConstants::build(&params);
        assert_eq!(constants.fault(), Some(EngineFault::InvalidModeParameters));
        assert_eq!(constants.mode(), None);
    }

    #[test]
    fn test_table_modes_share_evaluation() {
        let lut = must(LutTable::new(&[
            (Fixed::ZERO, Fixed::ONE),
            (Fixed::from_int(10), Fixed::from_int(3)),
        ]));
        let lut_params = CurveParams {
            mode: AccelMode::Lut.into(),
            lut,
            ..CurveParams::default()
        };
        let custom_params = CurveParams {
            mode: AccelMode::CustomCurve.into(),
            ..lut_params
        };
        for i in 1..20 {
            let x = Fixed::from_int(i);
            assert_eq!(evaluate(x, &lut_params), evaluate(x, &custom_params));
        }
        assert_eq!(evaluate(Fixed::from_int(5), &lut_params), Fixed::TWO);
    }

    #[test]
    fn test_non_positive_input_is_unit_factor() {
        let params = CurveParams {
            mode: AccelMode::Linear.into(),
            acceleration: Fixed::ONE,
            ..CurveParams::default()
        };
        let constants = ModeConstants::build(&params);
        assert_eq!(constants.evaluate(Fixed::ZERO, &params), Fixed::ONE);
        assert_eq!(constants.evaluate(-Fixed::ONE, &params), Fixed::ONE);
    }

    #[test]
    fn test_default_is_linear_identity() {
        let constants = ModeConstants::default();
        assert_eq!(constants.mode(), Some(AccelMode::Linear));
        assert_eq!(
            constants.evaluate(Fixed::from_int(50), &CurveParams::default()),
            Fixed::ONE
        );
    }

    #[test]
    fn test_every_mode_builds_with_reasonable_parameters() {
        let base = CurveParams {
            acceleration: Fixed::from_ratio(1, 10),
            exponent: Fixed::TWO,
            midpoint: Fixed::from_int(5),
            motivity: Fixed::from_ratio(3, 2),
            ..CurveParams::default()
        };
        for mode in AccelMode::ALL {
            let params = CurveParams {
                mode: mode.into(),
                ..base
            };
            let constants = ModeConstants::build(&params);
            assert_eq!(constants.mode(), Some(mode), "{mode} fell back to pass-through");
        }
    }
}
