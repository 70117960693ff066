//! Cubefield engine crate.
//!
//! Windowing + GPU runtime, the math used to place objects, and the instanced
//! cube render core driven by the demo binary.

pub mod core;
pub mod device;
pub mod logging;
pub mod math;
pub mod render;
pub mod time;
pub mod window;
