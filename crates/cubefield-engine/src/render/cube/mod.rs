//! Instanced cube renderer.
//!
//! One mesh, one shader program, one texture, drawn as a grid of instances
//! whose transforms are recomputed every frame into a ring of per-frame
//! buffers.

mod animator;
mod geometry;
mod renderer;
mod resources;
mod shader;
mod texture;

pub use animator::{instance_color, CameraRecord, InstanceAnimator, InstanceRecord};
pub use geometry::{MeshGeometry, Vertex, CUBE_INDICES, CUBE_VERTICES};
pub use renderer::CubeRenderer;
pub use resources::{CubeResources, FrameSlot, MeshBuffers, CAMERA_BINDING};
pub use shader::{ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};
pub use texture::{checkerboard_rgba, is_light, CHECKER_FORMAT};

/// Geometry + shader pair the renderer is built from.
///
/// Injected at construction so tests and tools can substitute either half.
#[derive(Debug, Clone, Default)]
pub struct CubeAssets {
    pub geometry: MeshGeometry,
    pub shader: ShaderProgram,
}

impl CubeAssets {
    /// Built-in cube mesh and shader program.
    pub fn builtin() -> Self {
        Self::default()
    }
}
