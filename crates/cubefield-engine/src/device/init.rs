/// Parameters for [`super::Gpu::new`].
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// `Fifo` blocks acquisition on vblank; redraws run at display rate.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the surface's first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Depth attachment format. Must have a depth aspect.
    pub depth_format: wgpu::TextureFormat,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Swapchain latency hint; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            depth_format: wgpu::TextureFormat::Depth16Unorm,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
