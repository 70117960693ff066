use bytemuck::Zeroable;

use crate::device::GpuFrame;
use crate::render::config::RendererConfig;
use crate::render::pacing::FrameGate;
use crate::render::RenderError;
use crate::time::AnimationClock;

use super::animator::{CameraRecord, InstanceAnimator, InstanceRecord};
use super::resources::CubeResources;
use super::CubeAssets;

/// Ring slot following `current` in a ring of `len` slots.
fn next_slot(current: usize, len: usize) -> usize {
    (current + 1) % len
}

/// Render core: owns the GPU resources, the frame ring and the pacing gate.
///
/// The host calls [`CubeRenderer::render`] once per redraw with the current
/// drawable. At most `frames_in_flight` frames are submitted without having
/// completed on the GPU; the ring slot a frame writes is never one the GPU
/// is still reading.
pub struct CubeRenderer {
    gate: FrameGate,
    staging: Vec<InstanceRecord>,
    camera: CameraRecord,
    animator: InstanceAnimator,
    clock: AnimationClock,
    frame: usize,
    config: RendererConfig,
    resources: CubeResources,
    device: wgpu::Device,
}

impl CubeRenderer {
    /// Builds every GPU resource up front.
    ///
    /// Errors are fatal; there is no fallback rendering path.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: RendererConfig,
        assets: &CubeAssets,
    ) -> Result<Self, RenderError> {
        let resources = CubeResources::build(device, queue, &config, assets)?;

        let animator = InstanceAnimator::new(&config);
        let staging = vec![InstanceRecord::zeroed(); animator.instance_count()];

        log::info!(
            "cube renderer ready: {} instances, {} frames in flight",
            animator.instance_count(),
            config.frames_in_flight
        );

        Ok(Self {
            gate: FrameGate::new(config.frames_in_flight),
            staging,
            camera: CameraRecord::new(&config.camera),
            animator,
            clock: AnimationClock::new(config.animation_step),
            frame: 0,
            config,
            resources,
            device: device.clone(),
        })
    }

    /// Pacing gate shared with the GPU completion callbacks.
    pub fn gate(&self) -> &FrameGate {
        &self.gate
    }

    pub fn resources(&self) -> &CubeResources {
        &self.resources
    }

    /// Ring slot written by the most recent frame.
    pub fn frame_slot(&self) -> usize {
        self.frame
    }

    /// Current animation angle.
    pub fn angle(&self) -> f32 {
        self.clock.angle()
    }

    /// Updates the projection aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect > 0.0 && aspect.is_finite()) {
            log::warn!("ignoring invalid aspect ratio {aspect}");
            return;
        }
        self.config.camera.aspect = aspect;
        self.camera = CameraRecord::new(&self.config.camera);
    }

    /// Renders one frame into `frame` and commits it (presenting surface
    /// frames).
    pub fn render(&mut self, mut frame: GpuFrame) {
        self.frame = next_slot(self.frame, self.resources.frames_in_flight());

        if !self.wait_for_slot() {
            return;
        }

        let t = self.clock.tick();
        self.update_slot(t.angle);
        self.encode(&mut frame);

        let gate = self.gate.clone();
        let submission = frame.commit(&self.resources.queue, move || gate.release());
        self.resources.slots[self.frame].submission = Some(submission);

        log::trace!("frame {} submitted on slot {}", t.frame_index, self.frame);
    }

    /// Takes a pacing slot, waiting for the oldest in-flight frame if none is
    /// free.
    ///
    /// wgpu delivers completion callbacks from device maintenance, so the
    /// render thread polls the device before blocking on the gate. The ring
    /// is walked in order, so the slot about to be written belongs to the
    /// oldest outstanding frame; only that submission is waited for.
    fn wait_for_slot(&self) -> bool {
        if self.gate.try_acquire() {
            return true;
        }

        log::trace!("{} frames in flight; waiting for the GPU", self.gate.capacity());

        let oldest = wgpu::PollType::Wait {
            submission_index: self.resources.slots[self.frame].submission.clone(),
            timeout: None,
        };
        if !self.poll(oldest) {
            return false;
        }
        if self.gate.try_acquire() {
            return true;
        }

        // A skipped frame leaves a stale index in its slot; drain everything.
        if !self.poll(wgpu::PollType::wait_indefinitely()) {
            return false;
        }
        self.gate.acquire();
        true
    }

    fn poll(&self, poll_type: wgpu::PollType) -> bool {
        match self.device.poll(poll_type) {
            Ok(_) => true,
            Err(err) => {
                log::error!("device poll failed while waiting for a frame slot: {err}");
                false
            }
        }
    }

    /// Writes instance and camera data for the current slot.
    fn update_slot(&mut self, angle: f32) {
        self.animator.write_instances(angle, &mut self.staging);

        let slot = &self.resources.slots[self.frame];
        let queue = &self.resources.queue;

        // Full-range writes: the whole slot is marked modified.
        queue.write_buffer(&slot.instances, 0, bytemuck::cast_slice(&self.staging));
        queue.write_buffer(&slot.camera, 0, bytemuck::bytes_of(&self.camera));
    }

    fn encode(&self, frame: &mut GpuFrame) {
        let res = &self.resources;
        let slot = &res.slots[self.frame];

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.config.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &frame.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&res.pipeline);
        rpass.set_vertex_buffer(0, res.mesh.vertex.slice(..));
        rpass.set_vertex_buffer(1, slot.instances.slice(..));
        rpass.set_bind_group(0, &slot.camera_bind_group, &[]);
        rpass.set_bind_group(1, &res.texture.bind_group, &[]);
        rpass.set_index_buffer(res.mesh.index.slice(..), wgpu::IndexFormat::Uint16);

        rpass.draw_indexed(0..res.mesh.index_count, 0, 0..self.animator.instance_count() as u32);
    }
}

impl Drop for CubeRenderer {
    fn drop(&mut self) {
        let in_flight = self.gate.in_flight();
        if in_flight > 0 {
            // Let outstanding frames retire before their buffers are released.
            if let Err(err) = self.device.poll(wgpu::PollType::wait_indefinitely()) {
                log::warn!("device poll failed during renderer teardown: {err}");
            }
        }
        log::debug!("cube renderer released ({in_flight} frames were in flight)");
    }
}
