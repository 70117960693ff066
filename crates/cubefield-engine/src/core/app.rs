use anyhow::Result;
use winit::dpi::PhysicalSize;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demo.
pub trait App {
    /// Called once after the window and GPU context exist.
    ///
    /// An error here is fatal: the runtime stops and returns it.
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()>;

    /// Called after the surface was resized (physical pixels, non-zero).
    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        let _ = size;
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
