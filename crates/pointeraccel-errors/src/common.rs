//! Top-level error type, categories and severity levels.

use core::fmt;

use crate::{CurveEditError, CurveImportError, EngineFault, LutError, ParamError};

/// Top-level error wrapping every sub-error.
#[derive(Debug, thiserror::Error)]
pub enum AccelError {
    /// Sample path fault
    #[error("engine fault: {0}")]
    Fault(#[from] EngineFault),

    /// Configuration parameter errors
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    /// Lookup table errors
    #[error("lookup table error: {0}")]
    Lut(#[from] LutError),

    /// Curve edit errors
    #[error("curve edit error: {0}")]
    CurveEdit(#[from] CurveEditError),

    /// Curve import errors
    #[error("curve import error: {0}")]
    CurveImport(#[from] CurveImportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccelError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AccelError::Fault(_) => ErrorCategory::Engine,
            AccelError::Param(_) | AccelError::Lut(_) => ErrorCategory::Config,
            AccelError::CurveEdit(_) | AccelError::CurveImport(_) => ErrorCategory::Curve,
            AccelError::Io(_) => ErrorCategory::IO,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AccelError::Fault(e) => e.severity(),
            AccelError::Param(e) => e.severity(),
            AccelError::Lut(_) => ErrorSeverity::Error,
            AccelError::CurveEdit(e) => e.severity(),
            AccelError::CurveImport(e) => e.severity(),
            AccelError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Whether the operation can be retried with corrected input.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Sample path faults
    Engine = 0,
    /// Configuration errors
    Config = 1,
    /// Curve authoring errors
    Curve = 2,
    /// I/O errors
    IO = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Engine => write!(f, "Engine"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Curve => write!(f, "Curve"),
            ErrorCategory::IO => write!(f, "IO"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, system may be in unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_category_mapping() {
        let err: AccelError = EngineFault::ArithmeticOverflow.into();
        assert_eq!(err.category(), ErrorCategory::Engine);
        let err: AccelError = LutError::NotIncreasing { index: 1 }.into();
        assert_eq!(err.category(), ErrorCategory::Config);
        let err: AccelError = CurveImportError::Empty.into();
        assert_eq!(err.category(), ErrorCategory::Curve);
    }

    #[test]
    fn test_nothing_is_critical() {
        let err: AccelError = CurveEditError::Locked(0).into();
        assert!(err.is_recoverable());
    }
}
