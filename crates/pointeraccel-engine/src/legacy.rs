//! Conversion from the older LEETMOUSE parameter set.
//!
//! The legacy driver scales by `post_scale` after dividing the effective
//! sensitivity by the base sensitivity. The converted form uses a unit
//! base sensitivity with the legacy sensitivity folded into acceleration
//! and cap, which reproduces the legacy output.

use pointeraccel_curves::AccelMode;
use pointeraccel_errors::ParamError;
use pointeraccel_fixed::Fixed;
use serde::{Deserialize, Serialize};

use crate::params::AccelParams;

/// Legacy parameters that cannot be expressed in the current form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LegacyError {
    /// The current form has a single pre-scale for both axes.
    #[error("pre-scale must match on both axes (x = {x}, y = {y})")]
    PreScaleMismatch {
        /// X pre-scale
        x: Fixed,
        /// Y pre-scale
        y: Fixed,
    },

    /// The legacy sensitivity divides everything else.
    #[error("legacy sensitivity must be positive, got {0}")]
    NonPositiveSensitivity(Fixed),

    /// The Y ratio is relative to the X post-scale, and a zero ratio
    /// would read as "follow the base sensitivity".
    #[error("legacy post-scale must not be zero")]
    ZeroPostScale,

    /// A converted value left the fixed-point range.
    #[error("converted {0} is out of range")]
    Overflow(&'static str),
}

/// LEETMOUSE configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyParams {
    /// X input multiplier.
    pub pre_scale_x: Fixed,
    /// Y input multiplier.
    pub pre_scale_y: Fixed,
    /// Rate offset.
    pub offset: Fixed,
    /// Input magnitude ceiling; zero disables.
    pub speed_cap: Fixed,
    /// Base sensitivity.
    pub sensitivity: Fixed,
    /// Linear acceleration.
    pub acceleration: Fixed,
    /// Effective sensitivity ceiling; zero disables.
    pub sens_cap: Fixed,
    /// X output multiplier.
    pub post_scale_x: Fixed,
    /// Y output multiplier.
    pub post_scale_y: Fixed,
}

impl Default for LegacyParams {
    fn default() -> Self {
        Self {
            pre_scale_x: Fixed::ONE,
            pre_scale_y: Fixed::ONE,
            offset: Fixed::ZERO,
            speed_cap: Fixed::ZERO,
            sensitivity: Fixed::ONE,
            acceleration: Fixed::ZERO,
            sens_cap: Fixed::ZERO,
            post_scale_x: Fixed::ONE,
            post_scale_y: Fixed::ONE,
        }
    }
}

impl LegacyParams {
    /// The legacy values read literally, without normalization.
    ///
    /// The engine evaluates these exactly as the legacy driver did.
    #[must_use]
    pub fn as_params(&self) -> AccelParams {
        AccelParams {
            pre_scale_x: self.pre_scale_x,
            pre_scale_y: self.pre_scale_y,
            speed_cap: self.speed_cap,
            sensitivity: self.sensitivity,
            sensitivity_y: Fixed::ZERO,
            acceleration: self.acceleration,
            sensitivity_cap: self.sens_cap,
            offset: self.offset,
            post_scale_x: self.post_scale_x,
            post_scale_y: self.post_scale_y,
            mode: AccelMode::Linear.into(),
            ..AccelParams::default()
        }
    }

    /// Legacy key names, as the old driver spelled them.
    pub const KEYS: [&'static str; 9] = [
        "PreScaleX",
        "PreScaleY",
        "Offset",
        "SpeedCap",
        "Sensitivity",
        "Acceleration",
        "SensitivityCap",
        "PostScaleX",
        "PostScaleY",
    ];

    /// Parse `text` into the legacy field named `key`.
    ///
    /// Keys match [`LegacyParams::KEYS`] ignoring case, `_` and `-`;
    /// `SensCap` is accepted for the cap.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] for an unknown key or unparsable text. The
    /// field is unchanged on error.
    pub fn apply_text(&mut self, key: &str, text: &str) -> Result<(), ParamError> {
        let folded: String = key
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let field = match folded.as_str() {
            "prescalex" => &mut self.pre_scale_x,
            "prescaley" => &mut self.pre_scale_y,
            "offset" => &mut self.offset,
            "speedcap" => &mut self.speed_cap,
            "sensitivity" => &mut self.sensitivity,
            "acceleration" => &mut self.acceleration,
            "sensitivitycap" | "senscap" => &mut self.sens_cap,
            "postscalex" => &mut self.post_scale_x,
            "postscaley" => &mut self.post_scale_y,
            _ => return Err(ParamError::UnknownKey(key.trim().to_owned())),
        };
        *field = text
            .parse::<Fixed>()
            .map_err(|e| ParamError::parse(key.trim(), text, e))?;
        Ok(())
    }

    /// Convert to the normalized unit-sensitivity form.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyError`] if the pre-scales differ, the sensitivity is
    /// not positive, either post-scale is zero or a derived value overflows.
    pub fn convert(&self) -> Result<AccelParams, LegacyError> {
        if self.pre_scale_x != self.pre_scale_y {
            return Err(LegacyError::PreScaleMismatch {
                x: self.pre_scale_x,
                y: self.pre_scale_y,
            });
        }
        if !self.sensitivity.is_positive() {
            return Err(LegacyError::NonPositiveSensitivity(self.sensitivity));
        }
        if self.post_scale_x.is_zero() || self.post_scale_y.is_zero() {
            return Err(LegacyError::ZeroPostScale);
        }

        let finite = |value: Fixed, name: &'static str| {
            if value.is_overflow() {
                Err(LegacyError::Overflow(name))
            } else {
                Ok(value)
            }
        };
        let acceleration = finite(self.acceleration / self.sensitivity, "acceleration")?;
        let sensitivity_cap = finite(self.sens_cap / self.sensitivity, "sensitivity cap")?;
        let sensitivity_y = finite(self.post_scale_y / self.post_scale_x, "Y sensitivity")?;

        Ok(AccelParams {
            pre_scale_x: self.pre_scale_x,
            pre_scale_y: self.pre_scale_y,
            speed_cap: self.speed_cap,
            sensitivity: Fixed::ONE,
            sensitivity_y,
            acceleration,
            sensitivity_cap,
            offset: self.offset,
            post_scale_x: self.post_scale_x,
            post_scale_y: self.post_scale_x,
            mode: AccelMode::Linear.into(),
            ..AccelParams::default()
        })
    }
}
