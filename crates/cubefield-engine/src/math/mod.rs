//! Math types and transform builders used by the cube renderer.
//!
//! Vectors and 4×4 matrices are `glam` types. Conventions:
//! - column vectors, matrices stored column-major (matches WGSL `mat4x4<f32>`)
//! - right-handed view space, camera looks down -Z
//! - clip-space depth in `[0, 1]` (wgpu convention)

mod normal;
mod transform;

pub use glam::{Mat3, Mat4, Vec3};
pub use normal::Float3x3;
pub use transform::{
    add, discard_translation, identity, perspective, rotate_x, rotate_y, rotate_z, scale,
    translate,
};

pub type Float3 = Vec3;
pub type Float4x4 = Mat4;
