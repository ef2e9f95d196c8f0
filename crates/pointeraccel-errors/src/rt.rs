//! Fault codes reported from the sample path.
//!
//! Faults are never fatal: the evaluator always produces output, and the
//! fault only tells the caller what degraded mode that output came from.

use core::fmt;

use crate::common::ErrorSeverity;

/// Fault raised while evaluating one motion sample.
///
/// - `Copy` semantics, no heap allocation
/// - Fixed `#[repr(u8)]` representation
///
/// # Examples
///
/// ```
/// use pointeraccel_errors::{EngineFault, ErrorSeverity};
///
/// let fault = EngineFault::ArithmeticOverflow;
/// assert_eq!(fault.code(), 1);
/// assert_eq!(fault.severity(), ErrorSeverity::Warning);
/// assert_eq!(EngineFault::from_code(1), Some(fault));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EngineFault {
    /// A fixed-point operation overflowed; raw input was passed through.
    ArithmeticOverflow = 1,
    /// The committed mode selector names no known mode.
    NoValidMode = 2,
    /// The selected mode's parameters are unusable (e.g. classic with an
    /// exponent of at most one).
    InvalidModeParameters = 3,
}

impl EngineFault {
    /// Numeric fault code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Severity for reporting.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            EngineFault::ArithmeticOverflow => ErrorSeverity::Warning,
            EngineFault::NoValidMode => ErrorSeverity::Warning,
            EngineFault::InvalidModeParameters => ErrorSeverity::Warning,
        }
    }

    /// Whether the output for the faulted sample is the unaccelerated input.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            EngineFault::NoValidMode | EngineFault::InvalidModeParameters
        )
    }

    /// Create a fault from its code.
    ///
    /// Returns `None` if the code does not correspond to a known fault.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EngineFault::ArithmeticOverflow),
            2 => Some(EngineFault::NoValidMode),
            3 => Some(EngineFault::InvalidModeParameters),
            _ => None,
        }
    }
}

impl fmt::Display for EngineFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineFault::ArithmeticOverflow => write!(f, "Fixed-point overflow, input passed through"),
            EngineFault::NoValidMode => write!(f, "No valid acceleration mode selected"),
            EngineFault::InvalidModeParameters => {
                write!(f, "Acceleration mode parameters are invalid")
            }
        }
    }
}

impl std::error::Error for EngineFault {}
