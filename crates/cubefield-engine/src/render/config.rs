use crate::math::Float3;

use super::RenderError;

/// Instance grid dimensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridDims {
    /// Instances along X (fastest-varying index).
    pub rows: usize,
    /// Instances along Y.
    pub columns: usize,
    /// Instances along Z (slowest-varying index).
    pub depth: usize,
}

impl GridDims {
    #[inline]
    pub const fn new(rows: usize, columns: usize, depth: usize) -> Self {
        Self { rows, columns, depth }
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.rows * self.columns * self.depth
    }

    /// Linear instance index of grid cell `(ix, iy, iz)`.
    #[inline]
    pub const fn flatten(self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.rows * (iy + self.columns * iz)
    }

    /// Grid cell of linear instance index `i`.
    #[inline]
    pub const fn unflatten(self, i: usize) -> (usize, usize, usize) {
        let ix = i % self.rows;
        let iy = (i / self.rows) % self.columns;
        let iz = i / (self.rows * self.columns);
        (ix, iy, iz)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

/// Camera projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub fov_y_radians: f32,
    /// Width / height. Updated from the surface size on resize.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_radians: 45f32.to_radians(),
            aspect: 1.0,
            near: 0.03,
            far: 500.0,
        }
    }
}

/// Renderer configuration.
///
/// Passed to [`CubeRenderer::new`](super::cube::CubeRenderer::new) once; the
/// values are fixed for the renderer's lifetime (except the camera aspect,
/// which follows the surface).
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Ring depth: frames that may be in flight at once. Must be >= 2.
    pub frames_in_flight: usize,

    pub grid: GridDims,

    /// Checkerboard texture edge length, in texels.
    pub texture_size: u32,

    /// Color attachment format. Must match the surface format.
    pub color_format: wgpu::TextureFormat,

    /// Depth attachment format. Must match the host's depth texture.
    pub depth_format: wgpu::TextureFormat,

    /// Animation angle added per frame, in radians.
    pub animation_step: f32,

    /// World-space center of the instance grid.
    pub object_position: Float3,

    /// Uniform cube scale; also sets the grid spacing (`2 * scale`).
    pub instance_scale: f32,

    pub camera: CameraConfig,

    pub clear_color: wgpu::Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            grid: GridDims::default(),
            texture_size: 128,
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: wgpu::TextureFormat::Depth16Unorm,
            animation_step: 0.002,
            object_position: Float3::new(0.0, 0.0, -10.0),
            instance_scale: 0.2,
            camera: CameraConfig::default(),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
        }
    }
}

impl RendererConfig {
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.grid.count()
    }

    /// Checks ranges that would otherwise surface as GPU validation errors.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: String| Err(RenderError::InvalidConfig(msg));

        if self.frames_in_flight < 2 {
            return invalid(format!(
                "frames_in_flight must be at least 2, got {}",
                self.frames_in_flight
            ));
        }

        let GridDims { rows, columns, depth } = self.grid;
        if rows == 0 || columns == 0 || depth == 0 {
            return invalid(format!("grid dimensions must be non-zero, got {rows}x{columns}x{depth}"));
        }
        if u32::try_from(self.instance_count()).is_err() {
            return invalid(format!("instance count {} exceeds u32", self.instance_count()));
        }

        if self.texture_size == 0 {
            return invalid("texture_size must be non-zero".to_string());
        }

        if !self.depth_format.has_depth_aspect() {
            return invalid(format!("{:?} is not a depth format", self.depth_format));
        }
        if self.color_format.is_depth_stencil_format() {
            return invalid(format!("{:?} is not a color format", self.color_format));
        }
        let color_usages = self
            .color_format
            .guaranteed_format_features(wgpu::Features::empty())
            .allowed_usages;
        if !color_usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT) {
            return invalid(format!("{:?} cannot be rendered to", self.color_format));
        }

        let cam = self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return invalid(format!("camera planes must satisfy 0 < near < far, got {} / {}", cam.near, cam.far));
        }
        if !(cam.aspect > 0.0 && cam.aspect.is_finite()) {
            return invalid(format!("camera aspect must be positive, got {}", cam.aspect));
        }
        if !(cam.fov_y_radians > 0.0 && cam.fov_y_radians < std::f32::consts::PI) {
            return invalid(format!("camera fov must be in (0, pi), got {}", cam.fov_y_radians));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ── grid ──────────────────────────────────────────────────────────────

    /// Enumerates cells the way the animator walks them: ix fastest, then iy, then iz.
    fn walk(grid: GridDims) -> Vec<(usize, usize, usize)> {
        let mut cells = Vec::with_capacity(grid.count());
        for iz in 0..grid.depth {
            for iy in 0..grid.columns {
                for ix in 0..grid.rows {
                    cells.push((ix, iy, iz));
                }
            }
        }
        cells
    }

    #[test]
    fn flatten_is_bijection_on_default_grid() {
        let grid = GridDims::default();
        let indices: Vec<usize> = walk(grid)
            .into_iter()
            .map(|(x, y, z)| grid.flatten(x, y, z))
            .collect();

        assert_eq!(indices.len(), 1000);
        assert_eq!(indices, (0..1000).collect::<Vec<_>>());
        assert_eq!(indices.iter().collect::<HashSet<_>>().len(), 1000);
    }

    #[test]
    fn flatten_is_bijection_on_uneven_grid() {
        let grid = GridDims::new(3, 4, 2);
        for (i, (x, y, z)) in walk(grid).into_iter().enumerate() {
            assert_eq!(grid.flatten(x, y, z), i);
            assert_eq!(grid.unflatten(i), (x, y, z));
        }
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn default_config_is_valid() {
        let cfg = RendererConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.instance_count(), 1000);
    }

    #[test]
    fn single_frame_ring_is_rejected() {
        let cfg = RendererConfig {
            frames_in_flight: 1,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let cfg = RendererConfig {
            grid: GridDims::new(10, 0, 10),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn color_format_as_depth_is_rejected() {
        let cfg = RendererConfig {
            depth_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_renderable_color_format_is_rejected() {
        let cfg = RendererConfig {
            color_format: wgpu::TextureFormat::Rgb9e5Ufloat,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn surface_color_formats_are_accepted() {
        for color_format in [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureFormat::Rgba16Float,
        ] {
            let cfg = RendererConfig {
                color_format,
                ..Default::default()
            };
            assert!(cfg.validate().is_ok(), "{color_format:?}");
        }
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let mut cfg = RendererConfig::default();
        cfg.camera.near = 10.0;
        cfg.camera.far = 1.0;
        assert!(cfg.validate().is_err());
    }
}
