//! Prelude module for convenient imports.

pub use crate::{
    clock::{Clock, ManualClock, MonotonicClock},
    engine::{AccelEngine, MotionDelta, SampleOutcome},
    legacy::LegacyParams,
    mailbox::ConfigSender,
    params::{AccelParams, ParamKey, ParamReport},
    pending::PendingUpdate,
};
pub use pointeraccel_curves::{AccelMode, LutTable, ModeSelector};
pub use pointeraccel_errors::{EngineFault, ParamError};
pub use pointeraccel_fixed::Fixed;
