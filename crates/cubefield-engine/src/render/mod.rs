//! GPU rendering subsystem.
//!
//! The render core is [`cube::CubeRenderer`]: it owns its GPU resources,
//! paces frames with [`pacing::FrameGate`] and draws the instanced cube grid.

pub mod config;
pub mod cube;
mod error;
pub mod pacing;

pub use config::{CameraConfig, GridDims, RendererConfig};
pub use error::RenderError;
