//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth attachment
//! - acquiring drawables for the render core and mapping surface errors

mod context;
mod depth;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
