//! Built-in cube mesh.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderError;

/// Mesh vertex: position, face normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // texcoord
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Vertex {
    Vertex { position, normal, texcoord }
}

const S: f32 = 0.5;

/// Unit cube, four vertices per face so each face carries its own normal.
pub const CUBE_VERTICES: [Vertex; 24] = [
    // front (+Z)
    v([-S, -S, S], [0.0, 0.0, 1.0], [0.0, 1.0]),
    v([S, -S, S], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([S, S, S], [0.0, 0.0, 1.0], [1.0, 0.0]),
    v([-S, S, S], [0.0, 0.0, 1.0], [0.0, 0.0]),
    // right (+X)
    v([S, -S, S], [1.0, 0.0, 0.0], [0.0, 1.0]),
    v([S, -S, -S], [1.0, 0.0, 0.0], [1.0, 1.0]),
    v([S, S, -S], [1.0, 0.0, 0.0], [1.0, 0.0]),
    v([S, S, S], [1.0, 0.0, 0.0], [0.0, 0.0]),
    // back (-Z)
    v([S, -S, -S], [0.0, 0.0, -1.0], [0.0, 1.0]),
    v([-S, -S, -S], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([-S, S, -S], [0.0, 0.0, -1.0], [1.0, 0.0]),
    v([S, S, -S], [0.0, 0.0, -1.0], [0.0, 0.0]),
    // left (-X)
    v([-S, -S, -S], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    v([-S, -S, S], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    v([-S, S, S], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    v([-S, S, -S], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    // top (+Y)
    v([-S, S, S], [0.0, 1.0, 0.0], [0.0, 1.0]),
    v([S, S, S], [0.0, 1.0, 0.0], [1.0, 1.0]),
    v([S, S, -S], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([-S, S, -S], [0.0, 1.0, 0.0], [0.0, 0.0]),
    // bottom (-Y)
    v([-S, -S, -S], [0.0, -1.0, 0.0], [0.0, 1.0]),
    v([S, -S, -S], [0.0, -1.0, 0.0], [1.0, 1.0]),
    v([S, -S, S], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([-S, -S, S], [0.0, -1.0, 0.0], [0.0, 0.0]),
];

/// Two counter-clockwise triangles per face.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // front
    4, 5, 6, 6, 7, 4, // right
    8, 9, 10, 10, 11, 8, // back
    12, 13, 14, 14, 15, 12, // left
    16, 17, 18, 18, 19, 16, // top
    20, 21, 22, 22, 23, 20, // bottom
];

/// Indexed triangle-list geometry uploaded once at renderer construction.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    pub label: Cow<'static, str>,
    pub vertices: Cow<'static, [Vertex]>,
    pub indices: Cow<'static, [u16]>,
}

impl MeshGeometry {
    /// The built-in textured cube.
    pub fn cube() -> Self {
        Self {
            label: Cow::Borrowed("cube"),
            vertices: Cow::Borrowed(&CUBE_VERTICES),
            indices: Cow::Borrowed(&CUBE_INDICES),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&*self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&*self.indices)
    }

    /// Rejects empty meshes, partial triangles, and out-of-range indices.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(RenderError::InvalidGeometry(format!("mesh '{}' is empty", self.label)));
        }
        if self.indices.len() % 3 != 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "mesh '{}' has {} indices, not a multiple of 3",
                self.label,
                self.indices.len()
            )));
        }
        if self.vertices.len() > usize::from(u16::MAX) + 1 {
            return Err(RenderError::InvalidGeometry(format!(
                "mesh '{}' has {} vertices, too many for 16-bit indices",
                self.label,
                self.vertices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| usize::from(i) >= self.vertices.len()) {
            return Err(RenderError::InvalidGeometry(format!(
                "mesh '{}' index {bad} out of range for {} vertices",
                self.label,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}

impl Default for MeshGeometry {
    fn default() -> Self {
        Self::cube()
    }
}
