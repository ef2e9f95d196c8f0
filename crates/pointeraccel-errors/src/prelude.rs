//! Prelude module for convenient error handling imports.

pub use crate::{
    FaultResult, Result,
    common::{AccelError, ErrorCategory, ErrorSeverity},
    config::{LutError, ParamError},
    curve::{CurveEditError, CurveImportError},
    rt::EngineFault,
};
