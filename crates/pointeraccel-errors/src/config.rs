//! Configuration text errors.
//!
//! These never reach the sample path. A field that fails here keeps its
//! previously committed value.

use core::fmt;

use pointeraccel_fixed::FixedParseError;

use crate::common::ErrorSeverity;

/// Lookup-table construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LutError {
    /// More points than the table can hold.
    #[error("lookup table has {len} points, capacity is {capacity}")]
    TooManyPoints {
        /// Supplied point count
        len: usize,
        /// Table capacity
        capacity: usize,
    },

    /// X values must be strictly increasing.
    #[error("lookup table x values must strictly increase (entry {index})")]
    NotIncreasing {
        /// Index of the first offending entry
        index: usize,
    },

    /// A point could not be parsed.
    #[error("malformed lookup table point '{0}'")]
    MalformedPoint(String),

    /// A coordinate was the overflow sentinel or otherwise unusable.
    #[error("lookup table entry {index} is not a finite value")]
    NonFinite {
        /// Index of the offending entry
        index: usize,
    },
}

/// Configuration parameter errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The key names no parameter.
    #[error("unknown parameter '{0}'")]
    UnknownKey(String),

    /// The text is not a fixed-point literal.
    #[error("parameter '{key}' has invalid value '{text}': {source}")]
    Parse {
        /// Parameter key
        key: String,
        /// Rejected text
        text: String,
        /// Underlying parse error
        #[source]
        source: FixedParseError,
    },

    /// The text is not a boolean.
    #[error("parameter '{key}' expects a boolean, got '{text}'")]
    InvalidBool {
        /// Parameter key
        key: String,
        /// Rejected text
        text: String,
    },

    /// The text names no acceleration mode and is not a mode code.
    #[error("parameter '{key}' expects a mode name or code, got '{text}'")]
    InvalidMode {
        /// Parameter key
        key: String,
        /// Rejected text
        text: String,
    },

    /// The value parsed but violates a constraint.
    #[error("parameter '{key}' value {value} is out of range: {reason}")]
    OutOfRange {
        /// Parameter key
        key: String,
        /// Rejected value
        value: String,
        /// Constraint that failed
        reason: &'static str,
    },

    /// `key=value` text without a separator.
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),

    /// Lookup table text was rejected.
    #[error("parameter '{key}': {source}")]
    Lut {
        /// Parameter key
        key: String,
        /// Underlying table error
        #[source]
        source: LutError,
    },
}

impl ParamError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ParamError::UnknownKey(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Key of the rejected field, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ParamError::UnknownKey(key)
            | ParamError::Parse { key, .. }
            | ParamError::InvalidBool { key, .. }
            | ParamError::InvalidMode { key, .. }
            | ParamError::OutOfRange { key, .. }
            | ParamError::Lut { key, .. } => Some(key),
            ParamError::MissingSeparator(_) => None,
        }
    }

    /// Create a parse error.
    pub fn parse(key: impl Into<String>, text: impl Into<String>, source: FixedParseError) -> Self {
        ParamError::Parse {
            key: key.into(),
            text: text.into(),
            source,
        }
    }

    /// Create an out of range error.
    pub fn out_of_range<T: fmt::Display>(
        key: impl Into<String>,
        value: T,
        reason: &'static str,
    ) -> Self {
        ParamError::OutOfRange {
            key: key.into(),
            value: value.to_string(),
            reason,
        }
    }

    /// Wrap a lookup-table error.
    pub fn lut(key: impl Into<String>, source: LutError) -> Self {
        ParamError::Lut {
            key: key.into(),
            source,
        }
    }
}
