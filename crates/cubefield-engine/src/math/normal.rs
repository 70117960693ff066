use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Vec4};

/// 3×3 matrix laid out for GPU buffers.
///
/// Each column is padded to 16 bytes, matching WGSL `mat3x3<f32>` in uniform
/// and vertex data. The padding lane is always zero.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Float3x3 {
    pub cols: [Vec4; 3],
}

impl Float3x3 {
    pub const fn from_mat3(m: Mat3) -> Self {
        Self {
            cols: [
                Vec4::new(m.x_axis.x, m.x_axis.y, m.x_axis.z, 0.0),
                Vec4::new(m.y_axis.x, m.y_axis.y, m.y_axis.z, 0.0),
                Vec4::new(m.z_axis.x, m.z_axis.y, m.z_axis.z, 0.0),
            ],
        }
    }

    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_cols(
            self.cols[0].truncate(),
            self.cols[1].truncate(),
            self.cols[2].truncate(),
        )
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.to_mat3().abs_diff_eq(other.to_mat3(), max_abs_diff)
    }
}

impl From<Mat3> for Float3x3 {
    #[inline]
    fn from(m: Mat3) -> Self {
        Self::from_mat3(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_to_three_vec4_columns() {
        assert_eq!(std::mem::size_of::<Float3x3>(), 48);
    }

    #[test]
    fn round_trips_through_mat3_with_zero_padding() {
        let m = Mat3::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let padded = Float3x3::from(m);
        assert_eq!(padded.to_mat3(), m);
        assert!(padded.cols.iter().all(|c| c.w == 0.0));
        assert_eq!(padded.cols[1], Vec4::new(4.0, 5.0, 6.0, 0.0));
    }
}
