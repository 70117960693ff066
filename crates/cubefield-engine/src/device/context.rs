use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::depth::DepthTarget;
use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects, the surface configuration and the depth attachment.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain) plus a matching depth texture
/// - acquires drawables (surface texture + depth view + encoder)
pub struct Gpu<'w> {
    /// Depth attachment; recreated on resize.
    depth: DepthTarget,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    depth_format: wgpu::TextureFormat,

    /// Command queue.
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    /// Selected adapter.
    _adapter: wgpu::Adapter,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,

    /// wgpu instance used to create the adapter and surface.
    _instance: wgpu::Instance,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");
        anyhow::ensure!(
            init.depth_format.has_depth_aspect(),
            "{:?} is not a depth format",
            init.depth_format
        );

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            depth_format,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::info!("using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("cubefield device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps.formats, prefer_srgb)
            .context("no supported surface formats")?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps.alpha_modes, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, depth_format, size);

        log::debug!(
            "surface configured: {}x{} {:?}, depth {:?}, {:?}",
            size.width,
            size.height,
            format,
            depth_format,
            present_mode
        );

        Ok(Self {
            depth,
            config,
            size,
            depth_format,
            queue,
            device,
            _adapter: adapter,
            surface,
            _instance: instance,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the depth attachment format.
    pub fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth_format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface and depth attachment after a resize.
    ///
    /// A 0x0 size only updates internal state; configuration is deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let configured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );

        if configured {
            self.depth = DepthTarget::new(&self.device, self.depth_format, new_size);
        }
    }

    /// Acquires the next drawable and creates an encoder for it.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cubefield frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture: Some(surface_texture),
            view,
            depth_view: self.depth.view.clone(),
            encoder,
        })
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
