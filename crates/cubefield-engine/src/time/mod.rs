//! Time subsystem.
//!
//! Animation here is frame-counted, not wall-clock driven: every presented
//! frame advances the clock by a fixed step, so animation speed follows the
//! display refresh rate.

mod animation_clock;

pub use animation_clock::{AnimationClock, AnimationTime};
