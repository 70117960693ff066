//! Spinning 10×10×10 grid of textured, instanced cubes.

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use cubefield_engine::core::{App, AppControl, FrameCtx};
use cubefield_engine::device::{Gpu, GpuInit};
use cubefield_engine::logging::{init_logging, LoggingConfig};
use cubefield_engine::render::cube::{CubeAssets, CubeRenderer};
use cubefield_engine::render::RendererConfig;
use cubefield_engine::window::{Runtime, RuntimeConfig};

#[derive(Default)]
struct CubeApp {
    renderer: Option<CubeRenderer>,
}

fn aspect_of(size: PhysicalSize<u32>) -> f32 {
    size.width.max(1) as f32 / size.height.max(1) as f32
}

impl App for CubeApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let mut config = RendererConfig {
            color_format: gpu.surface_format(),
            depth_format: gpu.depth_format(),
            ..RendererConfig::default()
        };
        config.camera.aspect = aspect_of(gpu.size());

        let renderer = CubeRenderer::new(gpu.device(), gpu.queue(), config, &CubeAssets::builtin())
            .context("failed to build the cube renderer")?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_aspect(aspect_of(size));
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        match ctx.acquire_drawable() {
            Ok(frame) => {
                renderer.render(frame);
                AppControl::Continue
            }
            Err(control) => control,
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = Runtime::run(RuntimeConfig::default(), GpuInit::default(), CubeApp::default()) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
