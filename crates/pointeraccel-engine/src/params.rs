//! Committed acceleration parameters and their textual keys.
//!
//! Configuration arrives as `key = text` pairs. Keys are matched without
//! regard to case or `_`/`-` separators, so `PreScaleX`, `pre_scale_x` and
//! `prescalex` all name the same field. Values are parsed and validated
//! here, before they can reach the sample path.

use core::fmt;
use core::str::FromStr;

use pointeraccel_curves::{CurveParams, LutTable, ModeSelector};
use pointeraccel_errors::ParamError;
use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};

use crate::pending::PendingUpdate;

/// A configurable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamKey {
    /// X input multiplier
    PreScaleX,
    /// Y input multiplier
    PreScaleY,
    /// Ceiling on the prescaled input magnitude (0 disables)
    SpeedCap,
    /// Base sensitivity, strictly positive
    Sensitivity,
    /// Y sensitivity; 0 follows `Sensitivity`
    SensitivityY,
    /// Acceleration strength or mode scale
    Acceleration,
    /// Ceiling on the effective sensitivity (0 disables)
    SensitivityCap,
    /// Ceiling on the rate fed to the curve (0 disables)
    InputCap,
    /// Subtracted from the rate before the curve
    Offset,
    /// X output multiplier
    PostScaleX,
    /// Y output multiplier
    PostScaleY,
    /// Wheel lines per tick; the wheel multiplier is this over three
    ScrollsPerTick,
    /// Input rotation in radians
    RotationAngle,
    /// Angular distance in radians within which motion snaps (0 disables)
    AngleSnapThreshold,
    /// Direction in radians that motion snaps to
    AngleSnapAngle,
    /// Acceleration mode name or code
    AccelerationMode,
    /// Smoothed (gain) form of the curve
    UseSmoothing,
    /// Mode exponent
    Exponent,
    /// Mode midpoint
    Midpoint,
    /// Mode motivity
    Motivity,
    /// Lookup table text, `x,y;x,y;...`
    LutData,
}

impl ParamKey {
    /// Every key, in canonical order.
    pub const ALL: [ParamKey; 21] = [
        ParamKey::PreScaleX,
        ParamKey::PreScaleY,
        ParamKey::SpeedCap,
        ParamKey::Sensitivity,
        ParamKey::SensitivityY,
        ParamKey::Acceleration,
        ParamKey::SensitivityCap,
        ParamKey::InputCap,
        ParamKey::Offset,
        ParamKey::PostScaleX,
        ParamKey::PostScaleY,
        ParamKey::ScrollsPerTick,
        ParamKey::RotationAngle,
        ParamKey::AngleSnapThreshold,
        ParamKey::AngleSnapAngle,
        ParamKey::AccelerationMode,
        ParamKey::UseSmoothing,
        ParamKey::Exponent,
        ParamKey::Midpoint,
        ParamKey::Motivity,
        ParamKey::LutData,
    ];

    /// Keys whose value is a single fixed-point number.
    pub const NUMERIC: [ParamKey; 18] = [
        ParamKey::PreScaleX,
        ParamKey::PreScaleY,
        ParamKey::SpeedCap,
        ParamKey::Sensitivity,
        ParamKey::SensitivityY,
        ParamKey::Acceleration,
        ParamKey::SensitivityCap,
        ParamKey::InputCap,
        ParamKey::Offset,
        ParamKey::PostScaleX,
        ParamKey::PostScaleY,
        ParamKey::ScrollsPerTick,
        ParamKey::RotationAngle,
        ParamKey::AngleSnapThreshold,
        ParamKey::AngleSnapAngle,
        ParamKey::Exponent,
        ParamKey::Midpoint,
        ParamKey::Motivity,
    ];

    /// Canonical key name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ParamKey::PreScaleX => "PreScaleX",
            ParamKey::PreScaleY => "PreScaleY",
            ParamKey::SpeedCap => "SpeedCap",
            ParamKey::Sensitivity => "Sensitivity",
            ParamKey::SensitivityY => "SensitivityY",
            ParamKey::Acceleration => "Acceleration",
            ParamKey::SensitivityCap => "SensitivityCap",
            ParamKey::InputCap => "InputCap",
            ParamKey::Offset => "Offset",
            ParamKey::PostScaleX => "PostScaleX",
            ParamKey::PostScaleY => "PostScaleY",
            ParamKey::ScrollsPerTick => "ScrollsPerTick",
            ParamKey::RotationAngle => "RotationAngle",
            ParamKey::AngleSnapThreshold => "AngleSnapThreshold",
            ParamKey::AngleSnapAngle => "AngleSnapAngle",
            ParamKey::AccelerationMode => "AccelerationMode",
            ParamKey::UseSmoothing => "UseSmoothing",
            ParamKey::Exponent => "Exponent",
            ParamKey::Midpoint => "Midpoint",
            ParamKey::Motivity => "Motivity",
            ParamKey::LutData => "LutData",
        }
    }

    /// Position in [`ParamKey::NUMERIC`], for numeric keys.
    #[must_use]
    pub fn numeric_index(self) -> Option<usize> {
        ParamKey::NUMERIC.iter().position(|&k| k == self)
    }

    /// Validate a numeric value for this key.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::OutOfRange`] for the overflow sentinel, a
    /// non-positive sensitivity or a negative cap.
    pub fn check(self, value: Fixed) -> Result<Fixed, ParamError> {
        if value.is_overflow() {
            return Err(ParamError::out_of_range(self.name(), value, "not a finite value"));
        }
        match self {
            ParamKey::Sensitivity if !value.is_positive() => Err(
                ParamError::out_of_range(self.name(), value, "sensitivity must be positive"),
            ),
            ParamKey::SpeedCap
            | ParamKey::SensitivityY
            | ParamKey::SensitivityCap
            | ParamKey::InputCap
            | ParamKey::AngleSnapThreshold
                if value.is_negative() =>
            {
                Err(ParamError::out_of_range(
                    self.name(),
                    value,
                    "must not be negative",
                ))
            }
            _ => Ok(value),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if folded == "outputcap" {
            return Ok(ParamKey::SensitivityCap);
        }
        ParamKey::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| ParamError::UnknownKey(s.trim().to_owned()))
    }
}

/// Parse a boolean flag: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`.
pub(crate) fn parse_flag(key: ParamKey, text: &str) -> Result<bool, ParamError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ParamError::InvalidBool {
            key: key.name().to_owned(),
            text: text.to_owned(),
        }),
    }
}

/// Split `KEY=VALUE`.
///
/// # Errors
///
/// Returns [`ParamError::MissingSeparator`] when there is no `=`.
pub fn split_assignment(text: &str) -> Result<(&str, &str), ParamError> {
    text.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| ParamError::MissingSeparator(text.to_owned()))
}

/// The committed parameter set.
///
/// # Example
///
/// ```
/// use pointeraccel_engine::AccelParams;
/// use pointeraccel_fixed::Fixed;
///
/// let mut params = AccelParams::default();
/// params.apply_text("pre_scale_x", "0.5")?;
/// assert_eq!(params.pre_scale_x, Fixed::HALF);
///
/// // A rejected value leaves the field untouched.
/// assert!(params.apply_text("Sensitivity", "-1").is_err());
/// assert_eq!(params.sensitivity, Fixed::ONE);
/// # Ok::<(), pointeraccel_errors::ParamError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelParams {
    /// X input multiplier.
    pub pre_scale_x: Fixed,
    /// Y input multiplier.
    pub pre_scale_y: Fixed,
    /// Ceiling on the prescaled input magnitude; zero disables.
    pub speed_cap: Fixed,
    /// Base sensitivity.
    pub sensitivity: Fixed,
    /// Y sensitivity; zero follows `sensitivity`.
    pub sensitivity_y: Fixed,
    /// Acceleration strength.
    pub acceleration: Fixed,
    /// Ceiling on the effective sensitivity; zero disables.
    pub sensitivity_cap: Fixed,
    /// Ceiling on the rate fed to the curve; zero disables.
    pub input_cap: Fixed,
    /// Subtracted from the rate.
    pub offset: Fixed,
    /// X output multiplier.
    pub post_scale_x: Fixed,
    /// Y output multiplier.
    pub post_scale_y: Fixed,
    /// Wheel lines per tick.
    pub scrolls_per_tick: Fixed,
    /// Input rotation in radians.
    pub rotation_angle: Fixed,
    /// Snap window in radians; zero disables.
    pub angle_snap_threshold: Fixed,
    /// Snap direction in radians.
    pub angle_snap_angle: Fixed,
    /// Acceleration mode.
    pub mode: ModeSelector,
    /// Smoothed curve form.
    pub use_smoothing: bool,
    /// Mode exponent.
    pub exponent: Fixed,
    /// Mode midpoint.
    pub midpoint: Fixed,
    /// Mode motivity.
    pub motivity: Fixed,
    /// Lookup table for the table-driven modes.
    pub lut: LutTable,
}

impl Default for AccelParams {
    fn default() -> Self {
        Self {
            pre_scale_x: Fixed::ONE,
            pre_scale_y: Fixed::ONE,
            speed_cap: Fixed::ZERO,
            sensitivity: Fixed::ONE,
            sensitivity_y: Fixed::ZERO,
            acceleration: Fixed::ZERO,
            sensitivity_cap: Fixed::ZERO,
            input_cap: Fixed::ZERO,
            offset: Fixed::ZERO,
            post_scale_x: Fixed::ONE,
            post_scale_y: Fixed::ONE,
            scrolls_per_tick: Fixed::from_int(3),
            rotation_angle: Fixed::ZERO,
            angle_snap_threshold: Fixed::ZERO,
            angle_snap_angle: Fixed::ZERO,
            mode: ModeSelector::default(),
            use_smoothing: false,
            exponent: Fixed::ZERO,
            midpoint: Fixed::ZERO,
            motivity: Fixed::ZERO,
            lut: LutTable::empty(),
        }
    }
}

impl AccelParams {
    /// Mutable access to a numeric field.
    pub fn number_mut(&mut self, key: ParamKey) -> Option<&mut Fixed> {
        let field = match key {
            ParamKey::PreScaleX => &mut self.pre_scale_x,
            ParamKey::PreScaleY => &mut self.pre_scale_y,
            ParamKey::SpeedCap => &mut self.speed_cap,
            ParamKey::Sensitivity => &mut self.sensitivity,
            ParamKey::SensitivityY => &mut self.sensitivity_y,
            ParamKey::Acceleration => &mut self.acceleration,
            ParamKey::SensitivityCap => &mut self.sensitivity_cap,
            ParamKey::InputCap => &mut self.input_cap,
            ParamKey::Offset => &mut self.offset,
            ParamKey::PostScaleX => &mut self.post_scale_x,
            ParamKey::PostScaleY => &mut self.post_scale_y,
            ParamKey::ScrollsPerTick => &mut self.scrolls_per_tick,
            ParamKey::RotationAngle => &mut self.rotation_angle,
            ParamKey::AngleSnapThreshold => &mut self.angle_snap_threshold,
            ParamKey::AngleSnapAngle => &mut self.angle_snap_angle,
            ParamKey::Exponent => &mut self.exponent,
            ParamKey::Midpoint => &mut self.midpoint,
            ParamKey::Motivity => &mut self.motivity,
            ParamKey::AccelerationMode | ParamKey::UseSmoothing | ParamKey::LutData => {
                return None;
            }
        };
        Some(field)
    }

    /// Value of a numeric field.
    #[must_use]
    pub fn number(&self, key: ParamKey) -> Option<Fixed> {
        let value = match key {
            ParamKey::PreScaleX => self.pre_scale_x,
            ParamKey::PreScaleY => self.pre_scale_y,
            ParamKey::SpeedCap => self.speed_cap,
            ParamKey::Sensitivity => self.sensitivity,
            ParamKey::SensitivityY => self.sensitivity_y,
            ParamKey::Acceleration => self.acceleration,
            ParamKey::SensitivityCap => self.sensitivity_cap,
            ParamKey::InputCap => self.input_cap,
            ParamKey::Offset => self.offset,
            ParamKey::PostScaleX => self.post_scale_x,
            ParamKey::PostScaleY => self.post_scale_y,
            ParamKey::ScrollsPerTick => self.scrolls_per_tick,
            ParamKey::RotationAngle => self.rotation_angle,
            ParamKey::AngleSnapThreshold => self.angle_snap_threshold,
            ParamKey::AngleSnapAngle => self.angle_snap_angle,
            ParamKey::Exponent => self.exponent,
            ParamKey::Midpoint => self.midpoint,
            ParamKey::Motivity => self.motivity,
            ParamKey::AccelerationMode | ParamKey::UseSmoothing | ParamKey::LutData => {
                return None;
            }
        };
        Some(value)
    }

    /// Current value of `key` rendered as configuration text.
    #[must_use]
    pub fn value_text(&self, key: ParamKey) -> String {
        match key {
            ParamKey::AccelerationMode => self.mode.to_string(),
            ParamKey::UseSmoothing => u8::from(self.use_smoothing).to_string(),
            ParamKey::LutData => self.lut.to_text(),
            _ => self.number(key).map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Every parameter as `(key, text)`, in canonical key order.
    #[must_use]
    pub fn to_text_pairs(&self) -> Vec<(ParamKey, String)> {
        ParamKey::ALL
            .iter()
            .map(|&key| (key, self.value_text(key)))
            .collect()
    }

    /// Parse and apply one field immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if the key is unknown or the text is
    /// rejected; the field keeps its previous value.
    pub fn apply_text(&mut self, key: &str, text: &str) -> Result<ParamKey, ParamError> {
        let mut update = PendingUpdate::new();
        let key = update.stage(key, text)?;
        update.apply_to(self);
        Ok(key)
    }

    /// Apply a batch of `(key, text)` pairs, collecting per-field results.
    ///
    /// Every accepted field is applied even when others are rejected.
    pub fn apply_all<'a, I>(&mut self, pairs: I) -> ParamReport
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut update = PendingUpdate::new();
        let report = update.stage_all(pairs);
        update.apply_to(self);
        report
    }

    /// The curve-shaping subset consumed by the mode constant cache.
    #[must_use]
    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            mode: self.mode,
            acceleration: self.acceleration,
            exponent: self.exponent,
            midpoint: self.midpoint,
            motivity: self.motivity,
            smoothing: self.use_smoothing,
            sensitivity: self.sensitivity,
            lut: self.lut,
        }
    }
}

/// Outcome of applying or staging a batch of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamReport {
    /// Keys whose values were accepted.
    pub accepted: Vec<ParamKey>,
    /// Fields that were rejected.
    pub rejected: Vec<ParamError>,
}

impl ParamReport {
    /// Whether every field was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
