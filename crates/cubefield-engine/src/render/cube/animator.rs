//! Per-frame instance and camera data.
//!
//! Everything here is CPU-only; the renderer uploads the results into the
//! current ring slot.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::math::{self, Float3, Float3x3, Float4x4};
use crate::render::config::{CameraConfig, GridDims, RendererConfig};

/// Per-instance GPU record (128 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub transform: Float4x4,
    pub normal_transform: Float3x3,
    pub color: [f32; 4],
}

impl InstanceRecord {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        3 => Float32x4, // transform col 0
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4, // normal transform col 0
        8 => Float32x4,
        9 => Float32x4,
        10 => Float32x4 // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRecord>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Camera uniform record (176 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraRecord {
    pub perspective_transform: Float4x4,
    pub world_transform: Float4x4,
    pub world_normal_transform: Float3x3,
}

impl CameraRecord {
    /// Fixed camera: projection from `camera`, identity world transform.
    pub fn new(camera: &CameraConfig) -> Self {
        let world_transform = math::identity();
        Self {
            perspective_transform: math::perspective(
                camera.fov_y_radians,
                camera.aspect,
                camera.near,
                camera.far,
            ),
            world_transform,
            world_normal_transform: math::discard_translation(&world_transform),
        }
    }
}

/// Deterministic instance color: red ramps up, green ramps down, blue is one
/// sine period over the instance range.
pub fn instance_color(index: usize, count: usize) -> [f32; 4] {
    let t = index as f32 / count as f32;
    [t, 1.0 - t, (TAU * t).sin(), 1.0]
}

/// Computes instance transforms for the cube grid.
#[derive(Debug, Clone)]
pub struct InstanceAnimator {
    grid: GridDims,
    object_position: Float3,
    scale: f32,
}

impl InstanceAnimator {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            grid: config.grid,
            object_position: config.object_position,
            scale: config.instance_scale,
        }
    }

    pub fn instance_count(&self) -> usize {
        self.grid.count()
    }

    /// Rigid transform shared by all instances: spins the whole grid about
    /// its own center.
    pub fn object_transform(&self, angle: f32) -> Float4x4 {
        let p = self.object_position;
        math::translate(p) * math::rotate_y(-angle) * math::rotate_x(angle * 0.5) * math::translate(-p)
    }

    /// Grid offset of cell `(ix, iy, iz)` relative to the object position.
    fn cell_offset(&self, ix: usize, iy: usize, iz: usize) -> Float3 {
        let s = self.scale;
        let g = self.grid;
        Float3::new(
            (ix as f32 - g.rows as f32 / 2.0) * (2.0 * s) + s,
            (iy as f32 - g.columns as f32 / 2.0) * (2.0 * s) + s,
            (iz as f32 - g.depth as f32 / 2.0) * (2.0 * s),
        )
    }

    /// Local transform of one cell: scale, then Z/Y spin, then placement.
    pub fn local_transform(&self, angle: f32, ix: usize, iy: usize, iz: usize) -> Float4x4 {
        let translate = math::translate(math::add(self.object_position, self.cell_offset(ix, iy, iz)));
        let yrot = math::rotate_y(angle * (iy as f32).cos());
        let zrot = math::rotate_z(angle * (ix as f32).sin());
        let scale = math::scale(Float3::splat(self.scale));
        translate * yrot * zrot * scale
    }

    /// Fills `out` (one record per instance) for animation angle `angle`.
    ///
    /// Instances are visited with `ix` fastest, then `iy`, then `iz`.
    pub fn write_instances(&self, angle: f32, out: &mut [InstanceRecord]) {
        debug_assert_eq!(out.len(), self.instance_count());

        let object = self.object_transform(angle);
        let count = self.instance_count();
        let (mut ix, mut iy, mut iz) = (0usize, 0usize, 0usize);

        for (i, record) in out.iter_mut().enumerate() {
            let transform = object * self.local_transform(angle, ix, iy, iz);
            *record = InstanceRecord {
                transform,
                normal_transform: math::discard_translation(&transform),
                color: instance_color(i, count),
            };

            ix += 1;
            if ix == self.grid.rows {
                ix = 0;
                iy += 1;
                if iy == self.grid.columns {
                    iy = 0;
                    iz += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn animator(grid: GridDims) -> InstanceAnimator {
        InstanceAnimator::new(&RendererConfig {
            grid,
            ..Default::default()
        })
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn record_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<InstanceRecord>(), 128);
        assert_eq!(std::mem::size_of::<CameraRecord>(), 176);
        assert_eq!(InstanceRecord::layout().array_stride, 128);
    }

    // ── color ─────────────────────────────────────────────────────────────

    #[test]
    fn color_ramp_endpoints() {
        let first = instance_color(0, 1000);
        assert_eq!(first[0], 0.0);
        assert_eq!(first[1], 1.0);
        assert!(first[2].abs() < EPS);
        assert_eq!(first[3], 1.0);

        let last = instance_color(999, 1000);
        assert!((last[0] - 0.999).abs() < EPS);
        assert!((last[1] - 0.001).abs() < EPS);

        let mid = instance_color(500, 1000);
        assert!(mid[2].abs() < EPS);

        let quarter = instance_color(250, 1000);
        assert!((quarter[2] - 1.0).abs() < EPS);
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn object_transform_pivots_about_object_position() {
        let a = animator(GridDims::default());
        let m = a.object_transform(1.3);
        let p = m.transform_point3(Float3::new(0.0, 0.0, -10.0));
        assert!(p.abs_diff_eq(Float3::new(0.0, 0.0, -10.0), EPS), "{p:?}");
    }

    #[test]
    fn zero_angle_places_cells_on_grid() {
        let a = animator(GridDims::default());
        let mut out = vec![InstanceRecord::zeroed(); a.instance_count()];
        a.write_instances(0.0, &mut out);

        // Cell (0, 0, 0): x = y = -5 * 0.4 + 0.2, z = -10 - 5 * 0.4.
        let origin = out[0].transform.transform_point3(Float3::ZERO);
        assert!(origin.abs_diff_eq(Float3::new(-1.8, -1.8, -12.0), EPS), "{origin:?}");

        // Scale only at angle zero.
        assert!((out[0].transform.x_axis.x - 0.2).abs() < EPS);
    }

    #[test]
    fn write_order_matches_flattening() {
        let grid = GridDims::new(3, 4, 5);
        let a = animator(grid);
        let mut out = vec![InstanceRecord::zeroed(); grid.count()];
        let angle = 0.75;
        a.write_instances(angle, &mut out);

        let object = a.object_transform(angle);
        for i in [0, 1, 2, 3, 11, 12, 37, grid.count() - 1] {
            let (ix, iy, iz) = grid.unflatten(i);
            let expected = object * a.local_transform(angle, ix, iy, iz);
            assert!(out[i].transform.abs_diff_eq(expected, EPS), "instance {i}");
        }
    }

    #[test]
    fn normal_transform_is_linear_part() {
        let a = animator(GridDims::new(2, 2, 2));
        let mut out = vec![InstanceRecord::zeroed(); 8];
        a.write_instances(2.0, &mut out);

        for r in &out {
            assert_eq!(r.normal_transform, math::discard_translation(&r.transform));
        }
    }

    #[test]
    fn camera_record_uses_identity_world() {
        let cam = CameraRecord::new(&CameraConfig::default());
        assert_eq!(cam.world_transform, math::identity());
        assert_eq!(cam.world_normal_transform.to_mat3(), math::Mat3::IDENTITY);
        // Row 3, column 2 carries the -z to w copy.
        assert_eq!(cam.perspective_transform.z_axis.w, -1.0);
    }
}
