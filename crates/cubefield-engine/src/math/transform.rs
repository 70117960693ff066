use glam::{Mat3, Mat4};

use super::{Float3, Float3x3, Float4x4};

/// Element-wise vector sum.
#[inline]
pub fn add(a: Float3, b: Float3) -> Float3 {
    a + b
}

#[inline]
pub fn identity() -> Float4x4 {
    Mat4::IDENTITY
}

/// Right-handed perspective projection.
///
/// View space looks down -Z. A point at `z = -near` maps to depth 0 and a point
/// at `z = -far` maps to depth 1 after the perspective divide, which is the
/// depth range the pipeline's `Less` compare and `1.0` depth clear expect.
#[inline]
pub fn perspective(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Float4x4 {
    Mat4::perspective_rh(fov_radians, aspect, near, far)
}

#[inline]
pub fn rotate_x(angle_radians: f32) -> Float4x4 {
    Mat4::from_rotation_x(angle_radians)
}

#[inline]
pub fn rotate_y(angle_radians: f32) -> Float4x4 {
    Mat4::from_rotation_y(angle_radians)
}

#[inline]
pub fn rotate_z(angle_radians: f32) -> Float4x4 {
    Mat4::from_rotation_z(angle_radians)
}

#[inline]
pub fn translate(v: Float3) -> Float4x4 {
    Mat4::from_translation(v)
}

#[inline]
pub fn scale(v: Float3) -> Float4x4 {
    Mat4::from_scale(v)
}

/// Upper-left 3×3 (linear part) of `m`, padded for GPU upload.
///
/// Used for normal transforms, which must never pick up translation.
pub fn discard_translation(m: &Float4x4) -> Float3x3 {
    Float3x3::from(Mat3::from_mat4(*m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPS: f32 = 1e-5;

    fn apply(m: Float4x4, p: Float3) -> Vec4 {
        m * p.extend(1.0)
    }

    fn assert_point(actual: Vec4, expected: [f32; 3]) {
        for i in 0..3 {
            assert!(
                (actual[i] / actual.w - expected[i]).abs() < EPS,
                "{actual:?} != {expected:?}"
            );
        }
    }

    // ── add / identity ────────────────────────────────────────────────────

    #[test]
    fn add_is_elementwise() {
        let v = add(Float3::new(1.0, 2.0, 3.0), Float3::new(-1.0, 0.5, 10.0));
        assert_eq!(v, Float3::new(0.0, 2.5, 13.0));
    }

    #[test]
    fn identity_is_neutral_for_mul() {
        let m = translate(Float3::new(1.0, 2.0, 3.0)) * rotate_z(0.3);
        assert!((identity() * m).abs_diff_eq(m, EPS));
        assert!((m * identity()).abs_diff_eq(m, EPS));
    }

    // ── rotations ─────────────────────────────────────────────────────────

    #[test]
    fn rotate_y_inverse_is_identity() {
        for i in 0..64 {
            let theta = -2.0 * PI + i as f32 * 0.2;
            let m = rotate_y(theta) * rotate_y(-theta);
            assert!(m.abs_diff_eq(identity(), EPS), "theta = {theta}");
        }
    }

    #[test]
    fn rotate_x_and_z_inverse_is_identity() {
        let theta = 1.234;
        assert!((rotate_x(theta) * rotate_x(-theta)).abs_diff_eq(identity(), EPS));
        assert!((rotate_z(theta) * rotate_z(-theta)).abs_diff_eq(identity(), EPS));
    }

    #[test]
    fn rotations_are_counter_clockwise() {
        // Quarter turns about each axis (right-hand rule).
        assert_point(apply(rotate_z(FRAC_PI_2), Float3::X), [0.0, 1.0, 0.0]);
        assert_point(apply(rotate_x(FRAC_PI_2), Float3::Y), [0.0, 0.0, 1.0]);
        assert_point(apply(rotate_y(FRAC_PI_2), Float3::Z), [1.0, 0.0, 0.0]);
    }

    // ── affine ────────────────────────────────────────────────────────────

    #[test]
    fn translate_then_scale_order() {
        // Scale applies first, then translation.
        let m = translate(Float3::new(1.0, 0.0, 0.0)) * scale(Float3::splat(2.0));
        assert_point(apply(m, Float3::ONE), [3.0, 2.0, 2.0]);
    }

    #[test]
    fn discard_translation_ignores_translation() {
        let ms = [
            identity(),
            rotate_x(0.7) * rotate_y(-1.1),
            scale(Float3::new(0.2, 3.0, 1.0)) * rotate_z(2.5),
        ];
        let vs = [Float3::new(0.0, 0.0, -10.0), Float3::new(4.0, -3.0, 8.5)];
        for m in &ms {
            for v in vs {
                let moved = translate(v) * *m;
                assert!(discard_translation(&moved).abs_diff_eq(&discard_translation(m), EPS));
            }
        }
    }

    #[test]
    fn discard_translation_keeps_linear_part_and_zero_padding() {
        let m = rotate_z(FRAC_PI_4);
        let n = discard_translation(&m);
        for c in 0..3 {
            assert_eq!(n.cols[c].truncate(), m.col(c).truncate());
        }
        assert!(n.cols.iter().all(|col| col.w == 0.0));
    }

    // ── perspective ───────────────────────────────────────────────────────

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth_range() {
        let p = perspective(45f32.to_radians(), 1.0, 0.03, 500.0);

        let near = apply(p, Float3::new(0.0, 0.0, -0.03));
        assert!((near.z / near.w).abs() < 1e-4);

        let far = apply(p, Float3::new(0.0, 0.0, -500.0));
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_w_is_view_distance() {
        let p = perspective(FRAC_PI_2, 2.0, 0.1, 100.0);
        let v = apply(p, Float3::new(0.0, 0.0, -7.0));
        assert!((v.w - 7.0).abs() < EPS);
    }

    #[test]
    fn perspective_applies_aspect_to_x() {
        // fov = 90° gives ys = 1; x is divided by the aspect ratio.
        let p = perspective(FRAC_PI_2, 2.0, 0.1, 100.0);
        assert!((p.x_axis.x - 0.5).abs() < EPS);
        assert!((p.y_axis.y - 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_matches_reference_layout() {
        // Rows (xs,0,0,0) (0,ys,0,0) (0,0,zs,near*zs) (0,0,-1,0), zs = far/(near-far).
        let (near, far) = (0.03, 500.0);
        let p = perspective(FRAC_PI_2, 1.0, near, far);
        let zs = far / (near - far);
        assert!((p.z_axis.z - zs).abs() < EPS);
        assert!((p.w_axis.z - near * zs).abs() < EPS);
        assert_eq!(p.z_axis.w, -1.0);
        assert_eq!(p.w_axis.w, 0.0);
    }
}
