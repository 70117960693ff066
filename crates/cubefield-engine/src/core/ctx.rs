use winit::window::Window;

use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};

use super::app::AppControl;

/// Per-redraw context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the drawable for this redraw.
    ///
    /// Surface errors are resolved here: `Err(AppControl::Continue)` means
    /// the frame should be skipped, `Err(AppControl::Exit)` that the surface
    /// is unusable.
    pub fn acquire_drawable(&mut self) -> Result<GpuFrame, AppControl> {
        match self.gpu.begin_frame() {
            Ok(frame) => {
                self.window.pre_present_notify();
                Ok(frame)
            }
            Err(err) => {
                log::debug!("surface acquisition failed: {err}");
                match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost irrecoverably");
                        Err(AppControl::Exit)
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Err(AppControl::Continue)
                    }
                }
            }
        }
    }
}
