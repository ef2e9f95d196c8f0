//! Curve authoring errors.

use crate::common::ErrorSeverity;

/// A curve edit that was refused. The curve is unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveEditError {
    /// Anchor index past the end.
    #[error("anchor {index} does not exist (curve has {len})")]
    NoSuchAnchor {
        /// Requested index
        index: usize,
        /// Anchor count
        len: usize,
    },

    /// Segment index past the end.
    #[error("segment {index} does not exist (curve has {len})")]
    NoSuchSegment {
        /// Requested index
        index: usize,
        /// Segment count
        len: usize,
    },

    /// The anchor is locked.
    #[error("anchor {0} is locked")]
    Locked(usize),

    /// Removing would leave fewer than the minimum anchor count.
    #[error("a curve needs at least {min} anchors")]
    TooFewAnchors {
        /// Minimum anchor count
        min: usize,
    },

    /// The requested x lies outside the curve's domain.
    #[error("x = {x} is outside the curve domain [{min}, {max}]")]
    OutsideDomain {
        /// Requested x
        x: f64,
        /// First anchor x
        min: f64,
        /// Last anchor x
        max: f64,
    },

    /// An anchor already sits at this x.
    #[error("an anchor already exists at x = {0}")]
    DuplicateX(f64),

    /// NaN or infinite coordinate.
    #[error("coordinate must be finite")]
    NonFinite,

    /// The exported table size is unsupported.
    #[error("table size {requested} is outside [{min}, {max}]")]
    TableSize {
        /// Requested size
        requested: usize,
        /// Minimum size
        min: usize,
        /// Maximum size
        max: usize,
    },
}

impl CurveEditError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CurveEditError::Locked(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Warning,
        }
    }
}

/// Malformed curve text. The existing curve is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveImportError {
    /// No text at all.
    #[error("curve text is empty")]
    Empty,

    /// The `|` between anchors and control points is missing.
    #[error("curve text is missing the '|' section separator")]
    MissingSection,

    /// A record has the wrong number of comma-separated fields.
    #[error("{section} record {index} has {found} fields, expected {expected}")]
    FieldCount {
        /// `anchor` or `control`
        section: &'static str,
        /// Record index
        index: usize,
        /// Fields found
        found: usize,
        /// Fields expected
        expected: &'static str,
    },

    /// A field is not a finite number.
    #[error("{section} record {index} has invalid number '{text}'")]
    InvalidNumber {
        /// `anchor` or `control`
        section: &'static str,
        /// Record index
        index: usize,
        /// Rejected text
        text: String,
    },

    /// Unknown anchor flag character.
    #[error("anchor record {index} has unknown flags '{flags}'")]
    InvalidFlags {
        /// Record index
        index: usize,
        /// Rejected flags
        flags: String,
    },

    /// Too few anchors.
    #[error("curve text has {found} anchors, at least {min} are required")]
    TooFewAnchors {
        /// Anchors found
        found: usize,
        /// Minimum anchor count
        min: usize,
    },

    /// Control pairs must number one less than anchors.
    #[error("curve text has {anchors} anchors but {controls} control pairs")]
    ControlCount {
        /// Anchor count
        anchors: usize,
        /// Control pair count
        controls: usize,
    },

    /// Anchor x values do not increase.
    #[error("anchor {index} does not lie to the right of its predecessor")]
    NotIncreasing {
        /// Offending anchor index
        index: usize,
    },

    /// An anchor sits below zero speed.
    #[error("anchor {index} has a negative speed")]
    NegativeX {
        /// Offending anchor index
        index: usize,
    },

    /// An anchor is closer to its predecessor than the minimum gap.
    #[error("anchor {index} is too close to its predecessor")]
    AnchorsTooClose {
        /// Offending anchor index
        index: usize,
    },
}

impl CurveImportError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
