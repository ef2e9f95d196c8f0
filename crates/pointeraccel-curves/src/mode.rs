//! Acceleration mode enumeration and the committed mode selector.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The nine supported acceleration curve shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AccelMode {
    /// `1 + slope·(x - midpoint)`
    Linear = 0,
    /// Power law, optionally capped asymptotically by `motivity`
    Power = 1,
    /// Power law gated by the midpoint
    Classic = 2,
    /// Log-sigmoid bounded by `motivity`
    Motivity = 3,
    /// Symmetric log-space curve around a synchronization speed
    Synchronous = 4,
    /// Step at the midpoint
    Jump = 5,
    /// Piecewise-linear over the committed lookup table
    Lut = 6,
    /// Lookup table exported by the curve editor
    CustomCurve = 7,
    /// Logarithmic growth
    Natural = 8,
}

impl AccelMode {
    /// Every mode, in code order.
    pub const ALL: [AccelMode; 9] = [
        AccelMode::Linear,
        AccelMode::Power,
        AccelMode::Classic,
        AccelMode::Motivity,
        AccelMode::Synchronous,
        AccelMode::Jump,
        AccelMode::Lut,
        AccelMode::CustomCurve,
        AccelMode::Natural,
    ];

    /// Numeric mode code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Mode for a numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        let code = u8::try_from(code).ok()?;
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    /// Lower-case name used in configuration text.
    pub fn name(self) -> &'static str {
        match self {
            AccelMode::Linear => "linear",
            AccelMode::Power => "power",
            AccelMode::Classic => "classic",
            AccelMode::Motivity => "motivity",
            AccelMode::Synchronous => "synchronous",
            AccelMode::Jump => "jump",
            AccelMode::Lut => "lut",
            AccelMode::CustomCurve => "custom_curve",
            AccelMode::Natural => "natural",
        }
    }

    /// Whether the mode reads the lookup table.
    pub fn is_table_driven(self) -> bool {
        matches!(self, AccelMode::Lut | AccelMode::CustomCurve)
    }

    fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "lookup_table" | "lookup" => Some(AccelMode::Lut),
            "custom" | "customcurve" => Some(AccelMode::CustomCurve),
            "sync" => Some(AccelMode::Synchronous),
            other => Self::ALL.into_iter().find(|m| m.name() == other),
        }
    }
}

impl fmt::Display for AccelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The committed mode selector.
///
/// A selector that parsed as a number but names no mode is kept as
/// [`ModeSelector::Unknown`]; the evaluator then refuses to accelerate
/// until a known mode is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelector {
    /// A known mode.
    Known(AccelMode),
    /// A numeric code with no mode behind it.
    Unknown(i64),
}

impl Default for ModeSelector {
    fn default() -> Self {
        ModeSelector::Known(AccelMode::Linear)
    }
}

impl ModeSelector {
    /// The known mode, if any.
    pub fn mode(self) -> Option<AccelMode> {
        match self {
            ModeSelector::Known(mode) => Some(mode),
            ModeSelector::Unknown(_) => None,
        }
    }
}

impl From<AccelMode> for ModeSelector {
    fn from(mode: AccelMode) -> Self {
        ModeSelector::Known(mode)
    }
}

/// Text that is neither a mode name nor an integer code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an acceleration mode name or code")]
pub struct ModeParseError(pub String);

impl FromStr for ModeSelector {
    type Err = ModeParseError;

    /// Accepts an integer code (`"3"`) or a mode name (`"motivity"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(code) = text.parse::<i64>() {
            return Ok(AccelMode::from_code(code).map_or(ModeSelector::Unknown(code), ModeSelector::Known));
        }
        AccelMode::from_name(text)
            .map(ModeSelector::Known)
            .ok_or_else(|| ModeParseError(text.to_owned()))
    }
}

impl fmt::Display for ModeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeSelector::Known(mode) => write!(f, "{mode}"),
            ModeSelector::Unknown(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_codes_are_dense_and_unique() {
        for (i, mode) in AccelMode::ALL.iter().enumerate() {
            assert_eq!(usize::from(mode.code()), i);
            assert_eq!(AccelMode::from_code(i as i64), Some(*mode));
        }
        assert_eq!(AccelMode::from_code(9), None);
        assert_eq!(AccelMode::from_code(-1), None);
    }

    #[test]
    fn test_selector_parses_codes_and_names() {
        assert_eq!(must("3".parse::<ModeSelector>()), AccelMode::Motivity.into());
        assert_eq!(must("Custom-Curve".parse::<ModeSelector>()), AccelMode::CustomCurve.into());
        assert_eq!(must(" natural ".parse::<ModeSelector>()), AccelMode::Natural.into());
        assert_eq!(must("42".parse::<ModeSelector>()), ModeSelector::Unknown(42));
        assert!("wobbly".parse::<ModeSelector>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for mode in AccelMode::ALL {
            assert_eq!(must(mode.name().parse::<ModeSelector>()), ModeSelector::Known(mode));
        }
    }

    #[test]
    fn test_unknown_code_displays_as_integer() {
        let selector = ModeSelector::Unknown(42);
        assert_eq!(selector.to_string(), "42");
        assert_eq!(must(selector.to_string().parse::<ModeSelector>()), selector);
    }
}
