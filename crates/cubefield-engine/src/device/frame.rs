/// The drawable for one redraw.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// one. Finished by [`GpuFrame::commit`].
pub struct GpuFrame {
    /// `None` for offscreen frames, which are never presented.
    pub surface_texture: Option<wgpu::SurfaceTexture>,
    pub view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// A frame that renders into caller-owned color and depth views.
    pub fn offscreen(
        device: &wgpu::Device,
        view: wgpu::TextureView,
        depth_view: wgpu::TextureView,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cubefield offscreen encoder"),
        });

        Self {
            surface_texture: None,
            view,
            depth_view,
            encoder,
        }
    }

    /// Submits the recorded commands, registers `on_complete` for when the GPU
    /// has finished them, and queues the surface texture (if any) for
    /// presentation.
    ///
    /// `on_complete` runs on whichever thread drives device maintenance.
    pub fn commit<F>(self, queue: &wgpu::Queue, on_complete: F) -> wgpu::SubmissionIndex
    where
        F: FnOnce() + Send + 'static,
    {
        let Self {
            surface_texture,
            view,
            depth_view,
            encoder,
        } = self;

        let index = queue.submit(std::iter::once(encoder.finish()));
        // Completion is defined relative to the most recent submit.
        queue.on_submitted_work_done(on_complete);

        drop(view);
        drop(depth_view);
        if let Some(surface_texture) = surface_texture {
            surface_texture.present();
        }
        index
    }
}
