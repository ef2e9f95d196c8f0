//! Real-time pointer acceleration engine.
//!
//! # Overview
//!
//! [`AccelEngine::process`] turns one raw `(dx, dy, wheel)` event into
//! accelerated integer motion:
//!
//! 1. frame time from the event timestamp, clamped to `[1, 100]` ms
//! 2. commit of staged configuration, at most once per second
//! 3. pre-scale, rotation and angle snapping
//! 4. speed cap on the input magnitude
//! 5. rate, input cap and offset
//! 6. acceleration factor from the cached mode constants
//! 7. sensitivity cap, normalization and post-scale
//! 8. wheel scaling and truncation with carried remainders
//!
//! # Configuration
//!
//! Parameters are staged as text ([`AccelEngine::stage`]) or sent from
//! another thread through a [`ConfigSender`]. Text is parsed and validated
//! when staged; a rejected field never reaches the committed
//! [`AccelParams`]. A [`AccelEngine::trigger`] asks for a commit, which the
//! sample path performs once the one-second cooldown has elapsed.
//!
//! # RT Safety
//!
//! The sample path does not allocate, lock or block. Faults
//! ([`EngineFault`]) are reported per sample and counted in
//! [`EngineCounters`]; output is always produced.
//!
//! [`EngineFault`]: pointeraccel_errors::EngineFault
//! [`EngineCounters`]: pointeraccel_atomic::EngineCounters

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod clock;
pub mod engine;
pub mod legacy;
pub mod mailbox;
pub mod params;
pub mod pending;
pub mod prelude;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::{AccelEngine, EngineConstants, MotionDelta, SampleOutcome};
pub use legacy::{LegacyError, LegacyParams};
pub use mailbox::{ConfigMailbox, ConfigSender, config_channel};
pub use params::{AccelParams, ParamKey, ParamReport, split_assignment};
pub use pending::{COMMIT_COOLDOWN_NS, Debounce, PendingUpdate};
pub use state::{CarryState, FrameTimeState, MAX_FRAME_MS, MIN_FRAME_MS};
