//! Error types for accelctl

use pointeraccel_engine::LegacyError;
use pointeraccel_errors::{AccelError, CurveEditError, CurveImportError, ErrorCategory, ParamError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Curve edit rejected: {0}")]
    CurveEdit(#[from] CurveEditError),

    #[error("Curve import failed: {0}")]
    CurveImport(#[from] CurveImportError),

    #[error("Legacy conversion failed: {0}")]
    Legacy(#[from] LegacyError),

    #[error("{0}")]
    Accel(#[from] AccelError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidParameter(_) | CliError::InvalidArgument(_) => 2,
            CliError::Script { .. } => 3,
            CliError::CurveEdit(_) | CliError::CurveImport(_) => 4,
            CliError::Legacy(_) => 5,
            CliError::Accel(e) => match e.category() {
                ErrorCategory::Config => 2,
                ErrorCategory::Curve => 4,
                ErrorCategory::Engine | ErrorCategory::IO => 1,
            },
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }

    /// Short variant name for JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::InvalidParameter(_) => "InvalidParameter",
            CliError::InvalidArgument(_) => "InvalidArgument",
            CliError::Script { .. } => "Script",
            CliError::CurveEdit(_) => "CurveEdit",
            CliError::CurveImport(_) => "CurveImport",
            CliError::Legacy(_) => "Legacy",
            CliError::Accel(_) => "Accel",
            CliError::IoError(_) => "IoError",
            CliError::JsonError(_) => "JsonError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let param = CliError::from(ParamError::UnknownKey("Nope".to_owned()));
        assert_eq!(param.exit_code(), 2);
        let curve = CliError::from(AccelError::from(CurveEditError::NonFinite));
        assert_eq!(curve.exit_code(), 4);
        let script = CliError::Script {
            line: 3,
            message: "bad".to_owned(),
        };
        assert_eq!(script.exit_code(), 3);
        assert_eq!(script.to_string(), "Script line 3: bad");
    }
}
