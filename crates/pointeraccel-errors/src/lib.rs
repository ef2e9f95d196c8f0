//! Centralized error types for the pointer acceleration engine.
//!
//! # Architecture
//!
//! - [`common`]: top-level [`AccelError`], categories and severities
//! - [`rt`]: [`EngineFault`], the `Copy` fault code reported from the sample path
//! - [`config`]: [`ParamError`] and [`LutError`] for configuration text
//! - [`curve`]: curve editing and import failures
//!
//! # RT Safety
//!
//! Only [`EngineFault`] ever crosses the sample path. It is `Copy`,
//! `#[repr(u8)]` and never allocates. Everything else here is produced while
//! staging configuration or editing curves, off the hot path.
//!
//! # Example
//!
//! ```
//! use pointeraccel_errors::prelude::*;
//!
//! fn require_positive(key: &str, value: i32) -> Result<i32> {
//!     if value <= 0 {
//!         return Err(ParamError::out_of_range(key, value, "must be greater than zero").into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(require_positive("Sensitivity", 0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod config;
pub mod curve;
pub mod prelude;
pub mod rt;

pub use common::{AccelError, ErrorCategory, ErrorSeverity};
pub use config::{LutError, ParamError};
pub use curve::{CurveEditError, CurveImportError};
pub use rt::EngineFault;

/// A specialized `Result` type for engine and tooling operations.
pub type Result<T> = std::result::Result<T, AccelError>;

/// A specialized `Result` type for the sample path.
pub type FaultResult<T = ()> = std::result::Result<T, EngineFault>;
