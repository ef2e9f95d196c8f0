//! # pointeraccel-atomic
//!
//! Lock-free primitives shared between the acceleration sample path and the
//! threads that configure or observe it.
//!
//! - [`counters`]: relaxed atomic counters incremented once per sample
//! - [`mailbox`]: bounded lock-free hand-off of values into the sample path
//!   (requires the `mailbox` feature)
//!
//! ## Safety Guarantees
//!
//! - **No heap allocations** after construction
//! - **No blocking operations**
//! - **Bounded execution time** for every method callable from the sample path
//!
//! ```rust
//! use pointeraccel_atomic::EngineCounters;
//!
//! let counters = EngineCounters::new();
//! counters.inc_sample();
//! counters.inc_overflow();
//!
//! let snapshot = counters.snapshot();
//! assert_eq!(snapshot.samples, 1);
//! assert_eq!(snapshot.overflow_samples, 1);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]

pub mod counters;

#[cfg(feature = "mailbox")]
pub mod mailbox;

pub use counters::{CounterSnapshot, EngineCounters};

#[cfg(feature = "mailbox")]
pub use mailbox::Mailbox;
